//! Export of receipts and invoices as plain-text files.
//!
//! This module does the lookups a document needs, hands the records to the
//! invoice formatter and writes the result into the export directory.
//! Unknown payments or students are not errors: the export is skipped and
//! `Ok(None)` returned.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{error, info, warn};

use crate::domain::fee_structure_service::{FeeStructureService, UNKNOWN_FEE_NAME};
use crate::domain::invoice::{invoice_file_name, receipt_file_name, InvoiceService};
use crate::domain::payment_service::PaymentService;
use crate::domain::student_service::StudentService;

/// A rendered document ready to be delivered
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
}

/// Where a document ended up
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub file_path: PathBuf,
    pub bytes_written: usize,
}

#[derive(Clone)]
pub struct ExportService {
    export_directory: PathBuf,
    invoice_service: InvoiceService,
    student_service: StudentService,
    fee_structure_service: FeeStructureService,
    payment_service: PaymentService,
}

impl ExportService {
    pub fn new(
        export_directory: PathBuf,
        invoice_service: InvoiceService,
        student_service: StudentService,
        fee_structure_service: FeeStructureService,
        payment_service: PaymentService,
    ) -> Self {
        Self {
            export_directory,
            invoice_service,
            student_service,
            fee_structure_service,
            payment_service,
        }
    }

    pub fn export_directory(&self) -> &Path {
        &self.export_directory
    }

    /// Render the receipt for a payment
    pub fn receipt_document(&self, payment_id: &str) -> Result<Option<ExportDocument>> {
        let payment = match self.payment_service.get_payment(payment_id)? {
            Some(payment) => payment,
            None => {
                warn!("📄 EXPORT: Payment not found: {}", payment_id);
                return Ok(None);
            }
        };

        let student = self.student_service.get_student(&payment.student_id)?;
        let fee_type_name = self.fee_structure_service.fee_type_name(&payment.fee_type_id)?;
        let content = self
            .invoice_service
            .format_receipt(&payment, student.as_ref(), &fee_type_name);

        Ok(Some(ExportDocument {
            file_name: receipt_file_name(&payment.receipt_number),
            content,
        }))
    }

    /// Render a student's payment-history invoice as of `generated_on`
    pub fn invoice_document(&self, student_id: &str, generated_on: NaiveDate) -> Result<Option<ExportDocument>> {
        let student = match self.student_service.get_student(student_id)? {
            Some(student) => student,
            None => {
                warn!("📄 EXPORT: Student not found: {}", student_id);
                return Ok(None);
            }
        };

        let structure = self.fee_structure_service.find_structure_for_class(&student.class)?;
        let payments = self.payment_service.payments_for_student(&student.id)?;
        let fee_type_names: HashMap<String, String> = self
            .fee_structure_service
            .list_fee_structures()?
            .into_iter()
            .flat_map(|fs| fs.fee_types)
            .rev()
            .map(|ft| (ft.id, ft.name))
            .collect();
        let lookup = |fee_type_id: &str| {
            fee_type_names
                .get(fee_type_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_FEE_NAME.to_string())
        };

        let content = self.invoice_service.format_student_invoice(
            &student,
            &payments,
            structure.as_ref(),
            &lookup,
            generated_on,
        );

        Ok(Some(ExportDocument {
            file_name: invoice_file_name(&student.name, generated_on),
            content,
        }))
    }

    /// Write a payment's receipt into the export directory
    pub fn export_receipt(&self, payment_id: &str) -> Result<Option<ExportOutcome>> {
        match self.receipt_document(payment_id)? {
            Some(document) => self.write_document(&document).map(Some),
            None => Ok(None),
        }
    }

    /// Write a student's invoice into the export directory
    pub fn export_invoice(&self, student_id: &str, generated_on: NaiveDate) -> Result<Option<ExportOutcome>> {
        match self.invoice_document(student_id, generated_on)? {
            Some(document) => self.write_document(&document).map(Some),
            None => Ok(None),
        }
    }

    fn write_document(&self, document: &ExportDocument) -> Result<ExportOutcome> {
        let mut components = Path::new(&document.file_name).components();
        if !matches!((components.next(), components.next()), (Some(Component::Normal(_)), None)) {
            error!("❌ EXPORT: Refusing file name outside the export directory: {:?}", document.file_name);
            return Err(anyhow::anyhow!("Invalid export file name {:?}", document.file_name));
        }

        if let Err(e) = fs::create_dir_all(&self.export_directory) {
            error!("❌ EXPORT: Failed to create export directory {:?}: {}", self.export_directory, e);
            return Err(anyhow::anyhow!("Failed to create export directory {:?}: {}", self.export_directory, e));
        }

        let file_path = self.export_directory.join(&document.file_name);

        // Write to a temp file first so a half-written document never appears
        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, &document.content)
            .with_context(|| format!("Failed to write export file {:?}", temp_path))?;
        fs::rename(&temp_path, &file_path)
            .with_context(|| format!("Failed to move export file into place at {:?}", file_path))?;

        info!("✅ EXPORT: Wrote {} ({} bytes) to {:?}", document.file_name, document.content.len(), file_path);
        Ok(ExportOutcome {
            file_path,
            bytes_written: document.content.len(),
        })
    }
}
