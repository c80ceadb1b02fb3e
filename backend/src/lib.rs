//! # Fee Desk Backend
//!
//! All non-UI logic for the school fee desk.
//!
//! - **Domain**: students, fee structures, payments, dues and documents
//! - **Storage**: the in-memory collections behind the domain services
//! - **IO**: export of receipts and invoices as text files
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (screens and forms, not part of this crate)
//!     ↓
//! Backend (services sharing one MemoryConnection)
//!     ↓
//! Storage Layer (in-memory collections)
//! ```
//!
//! Every service is built around the same connection, so a payment recorded
//! through one service is visible to dues and dashboard queries at once.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    DashboardService, DuesService, FeeStructureService, InvoiceService, PaymentService,
    ReceiptNumberGenerator, StudentService,
};
use crate::io::ExportService;
use crate::storage::MemoryConnection;

/// Main backend struct that holds all services
#[derive(Clone)]
pub struct Backend {
    pub connection: MemoryConnection,
    pub student_service: StudentService,
    pub fee_structure_service: FeeStructureService,
    pub payment_service: PaymentService,
    pub dues_service: DuesService,
    pub dashboard_service: DashboardService,
    pub invoice_service: InvoiceService,
    pub export_service: ExportService,
}

impl Backend {
    /// Build a backend from configuration, seeding the sample records if enabled
    pub fn new(config: &AppConfig) -> Result<Self> {
        let backend = Self::with_connection(MemoryConnection::new(), config);

        if config.seed_sample_data {
            info!("Seeding sample data");
            domain::sample_data::seed(&backend.connection)?;
        }

        Ok(backend)
    }

    /// Build every service around an existing connection
    pub fn with_connection(connection: MemoryConnection, config: &AppConfig) -> Self {
        info!("Setting up domain services");
        let student_service = StudentService::new(connection.clone());
        let fee_structure_service = FeeStructureService::new(connection.clone());
        let payment_service = PaymentService::new(
            connection.clone(),
            ReceiptNumberGenerator::new(config.receipt_prefix.clone()),
        );
        let dues_service = DuesService::new(connection.clone());
        let dashboard_service = DashboardService::new(
            student_service.clone(),
            payment_service.clone(),
            dues_service.clone(),
            config.recent_payments_limit,
        );
        let invoice_service = InvoiceService::with_config(config.invoice_config());
        let export_service = ExportService::new(
            config.export_directory.clone(),
            invoice_service.clone(),
            student_service.clone(),
            fee_structure_service.clone(),
            payment_service.clone(),
        );

        Self {
            connection,
            student_service,
            fee_structure_service,
            payment_service,
            dues_service,
            dashboard_service,
            invoice_service,
            export_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::payment::RecordPaymentCommand;
    use chrono::NaiveDate;
    use shared::{PaymentMethod, PaymentStatus};
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> AppConfig {
        AppConfig {
            export_directory: dir.path().to_path_buf(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_seeded_backend_matches_sample_dashboard() {
        let temp_dir = TempDir::new().unwrap();
        let backend = Backend::new(&test_config(&temp_dir)).unwrap();

        assert_eq!(backend.dues_service.get_student_dues("1").unwrap(), 2000.0);
        assert_eq!(backend.dues_service.get_student_dues("2").unwrap(), 7000.0);

        let stats = backend.dashboard_service.stats().unwrap();
        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.total_collected, 5000.0);
        assert_eq!(stats.total_dues, 9000.0);
        assert_eq!(stats.collection_rate, Some(36));
    }

    #[test]
    fn test_unseeded_backend_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig {
            seed_sample_data: false,
            ..test_config(&temp_dir)
        };
        let backend = Backend::new(&config).unwrap();

        assert_eq!(backend.connection.counts().unwrap(), (0, 0, 0));
    }

    #[test]
    fn test_services_share_one_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig {
            receipt_prefix: "SCH".to_string(),
            ..test_config(&temp_dir)
        };
        let backend = Backend::new(&config).unwrap();

        let payment = backend
            .payment_service
            .add_payment(RecordPaymentCommand {
                student_id: "2".to_string(),
                fee_type_id: "2".to_string(),
                amount: 1500.0,
                date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                method: PaymentMethod::Card,
                status: PaymentStatus::Completed,
            })
            .unwrap();

        assert!(payment.receipt_number.starts_with("SCH"));
        assert_eq!(backend.dues_service.get_student_dues("2").unwrap(), 5500.0);

        let document = backend
            .export_service
            .receipt_document(&payment.id)
            .unwrap()
            .unwrap();
        assert!(document.content.contains("Fee Type: Transport Fee\n"));
        assert!(document.content.contains("Payment Method: CARD\n"));
    }
}
