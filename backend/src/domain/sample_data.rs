//! Sample records the fee desk starts with when seeding is enabled.

use anyhow::Result;
use chrono::NaiveDate;
use shared::{
    FeeCategory, FeeFrequency, FeeStructure, FeeType, Payment, PaymentMethod, PaymentStatus, Student,
};
use tracing::info;

use crate::storage::{
    FeeStructureRepository, FeeStructureStorage, MemoryConnection, PaymentRepository, PaymentStorage,
    StudentRepository, StudentStorage,
};

fn day(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("Invalid sample date {}-{}-{}", year, month, day))
}

pub fn sample_students() -> Result<Vec<Student>> {
    Ok(vec![
        Student {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            roll_number: "2024001".to_string(),
            class: "10".to_string(),
            section: "A".to_string(),
            parent_name: "Robert Doe".to_string(),
            parent_contact: "+1234567890".to_string(),
            email: "john.doe@email.com".to_string(),
            admission_date: day(2024, 1, 15)?,
        },
        Student {
            id: "2".to_string(),
            name: "Jane Smith".to_string(),
            roll_number: "2024002".to_string(),
            class: "10".to_string(),
            section: "B".to_string(),
            parent_name: "Michael Smith".to_string(),
            parent_contact: "+1234567891".to_string(),
            email: "jane.smith@email.com".to_string(),
            admission_date: day(2024, 1, 16)?,
        },
    ])
}

pub fn sample_fee_structures() -> Vec<FeeStructure> {
    let fee_type = |id: &str, name: &str, amount: f64, frequency, category| FeeType {
        id: id.to_string(),
        name: name.to_string(),
        amount,
        frequency,
        category,
    };

    vec![FeeStructure {
        id: "1".to_string(),
        name: "Class 10 Fee Structure".to_string(),
        class: "10".to_string(),
        fee_types: vec![
            fee_type("1", "Tuition Fee", 5000.0, FeeFrequency::Monthly, FeeCategory::Tuition),
            fee_type("2", "Transport Fee", 1500.0, FeeFrequency::Monthly, FeeCategory::Transport),
            fee_type("3", "Library Fee", 500.0, FeeFrequency::Yearly, FeeCategory::Library),
        ],
        total_amount: 7000.0,
    }]
}

pub fn sample_payments() -> Result<Vec<Payment>> {
    Ok(vec![Payment {
        id: "1".to_string(),
        student_id: "1".to_string(),
        fee_type_id: "1".to_string(),
        amount: 5000.0,
        date: day(2024, 1, 15)?,
        method: PaymentMethod::Online,
        receipt_number: "RCP001".to_string(),
        status: PaymentStatus::Completed,
    }])
}

/// Load the sample students, fee structure and payment into `connection`
pub fn seed(connection: &MemoryConnection) -> Result<()> {
    let students = StudentRepository::new(connection.clone());
    let structures = FeeStructureRepository::new(connection.clone());
    let payments = PaymentRepository::new(connection.clone());

    for student in sample_students()? {
        students.store_student(&student)?;
    }
    for structure in sample_fee_structures() {
        structures.store_fee_structure(&structure)?;
    }
    for payment in sample_payments()? {
        payments.store_payment(&payment)?;
    }

    let (student_count, structure_count, payment_count) = connection.counts()?;
    info!("🌱 SEED: Loaded {} students, {} fee structures, {} payments",
          student_count, structure_count, payment_count);
    Ok(())
}
