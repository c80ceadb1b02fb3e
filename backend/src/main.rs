use anyhow::Result;
use chrono::Local;
use fee_desk_backend::config::AppConfig;
use fee_desk_backend::Backend;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    info!("Starting fee desk for {}", config.school_name);

    let backend = Backend::new(&config)?;

    let stats = backend.dashboard_service.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    let today = Local::now().date_naive();

    let mut failed = 0;

    for payment in backend.payment_service.list_payments()? {
        match backend.export_service.export_receipt(&payment.id) {
            Ok(Some(_)) => {}
            Ok(None) => warn!("Skipped receipt for payment {}", payment.id),
            Err(e) => {
                error!("Failed to export receipt {}: {:#}", payment.receipt_number, e);
                failed += 1;
            }
        }
    }

    for student in backend.student_service.list_students()? {
        match backend.export_service.export_invoice(&student.id, today) {
            Ok(Some(_)) => {}
            Ok(None) => warn!("Skipped invoice for student {}", student.id),
            Err(e) => {
                error!("Failed to export invoice for {}: {:#}", student.name, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} exports failed, see log for details", failed);
    }
    info!("Exports written to {:?}", backend.export_service.export_directory());
    Ok(())
}
