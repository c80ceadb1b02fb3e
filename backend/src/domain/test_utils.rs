//! Shared fixtures for domain tests.
//!
//! `TestHelper` wires every service around one fresh connection, so a test
//! sees exactly the records it created.

use chrono::NaiveDate;
use shared::{FeeCategory, FeeFrequency, FeeStructure, FeeType, Payment, PaymentMethod, PaymentStatus, Student};

use crate::domain::commands::fee_structure::CreateFeeStructureCommand;
use crate::domain::commands::payment::RecordPaymentCommand;
use crate::domain::commands::student::CreateStudentCommand;
use crate::domain::identity::ReceiptNumberGenerator;
use crate::domain::{
    DashboardService, DuesService, FeeStructureService, InvoiceService, PaymentService, StudentService,
};
use crate::storage::MemoryConnection;

pub struct TestHelper {
    pub connection: MemoryConnection,
    pub student_service: StudentService,
    pub fee_structure_service: FeeStructureService,
    pub payment_service: PaymentService,
    pub dues_service: DuesService,
    pub dashboard_service: DashboardService,
    pub invoice_service: InvoiceService,
}

impl TestHelper {
    pub fn new() -> Self {
        let connection = MemoryConnection::new();
        let student_service = StudentService::new(connection.clone());
        let fee_structure_service = FeeStructureService::new(connection.clone());
        let payment_service = PaymentService::new(connection.clone(), ReceiptNumberGenerator::default());
        let dues_service = DuesService::new(connection.clone());
        let dashboard_service = DashboardService::new(
            student_service.clone(),
            payment_service.clone(),
            dues_service.clone(),
            5,
        );

        Self {
            connection,
            student_service,
            fee_structure_service,
            payment_service,
            dues_service,
            dashboard_service,
            invoice_service: InvoiceService::new(),
        }
    }

    pub fn add_student(&self, name: &str, class: &str) -> Student {
        self.student_service
            .add_student(student_command(name, class))
            .expect("Failed to add student")
    }

    /// Add a tuition/transport/library structure with the given (not recomputed) total
    pub fn add_structure(&self, class: &str, total_amount: f64) -> FeeStructure {
        self.fee_structure_service
            .add_fee_structure(CreateFeeStructureCommand {
                name: format!("Class {} Fee Structure", class),
                class: class.to_string(),
                fee_types: vec![
                    fee_type("Tuition Fee", 5000.0),
                    fee_type("Transport Fee", 1500.0),
                    fee_type("Library Fee", 500.0),
                ],
                total_amount,
            })
            .expect("Failed to add fee structure")
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn student_command(name: &str, class: &str) -> CreateStudentCommand {
    CreateStudentCommand {
        name: name.to_string(),
        roll_number: "2024001".to_string(),
        class: class.to_string(),
        section: "A".to_string(),
        parent_name: "Robert Doe".to_string(),
        parent_contact: "+1234567890".to_string(),
        email: "student@email.com".to_string(),
        admission_date: date(2024, 1, 15),
    }
}

pub fn student(id: &str, name: &str, class: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        roll_number: "2024001".to_string(),
        class: class.to_string(),
        section: "A".to_string(),
        parent_name: "Robert Doe".to_string(),
        parent_contact: "+1234567890".to_string(),
        email: "student@email.com".to_string(),
        admission_date: date(2024, 1, 15),
    }
}

/// Monthly tuition-category fee type with ID "ft-<first word, lowercased>"
pub fn fee_type(name: &str, amount: f64) -> FeeType {
    let slug = name.split_whitespace().next().unwrap_or("fee").to_lowercase();
    FeeType {
        id: format!("ft-{}", slug),
        name: name.to_string(),
        amount,
        frequency: FeeFrequency::Monthly,
        category: FeeCategory::Tuition,
    }
}

/// Completed cash payment against fee type "ft1"
pub fn payment(id: &str, student_id: &str, amount: f64, date: NaiveDate) -> Payment {
    Payment {
        id: id.to_string(),
        student_id: student_id.to_string(),
        fee_type_id: "ft1".to_string(),
        amount,
        date,
        method: PaymentMethod::Cash,
        receipt_number: format!("RCP-{}", id),
        status: PaymentStatus::Completed,
    }
}

/// Completed cash payment command against the "ft-tuition" fee type
pub fn payment_command(student_id: &str, amount: f64, date: NaiveDate) -> RecordPaymentCommand {
    RecordPaymentCommand {
        student_id: student_id.to_string(),
        fee_type_id: "ft-tuition".to_string(),
        amount,
        date,
        method: PaymentMethod::Cash,
        status: PaymentStatus::Completed,
    }
}
