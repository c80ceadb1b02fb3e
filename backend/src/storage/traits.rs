//! # Storage Traits
//!
//! Storage abstraction used by the domain layer. Lookups that find nothing
//! return `Ok(None)`, `Ok(false)` or an empty list; `Err` is reserved for
//! the storage itself failing.

use anyhow::Result;
use shared::{FeeStructure, Payment, Student};

/// Interface for student storage operations
pub trait StudentStorage: Send + Sync {
    /// Append a new student
    fn store_student(&self, student: &Student) -> Result<()>;

    /// Retrieve a student by ID
    fn get_student(&self, student_id: &str) -> Result<Option<Student>>;

    /// List all students in insertion order
    fn list_students(&self) -> Result<Vec<Student>>;

    /// Replace the stored student with the same ID.
    /// Returns false if no such student exists.
    fn update_student(&self, student: &Student) -> Result<bool>;

    /// Remove a student by ID.
    /// Returns false if no such student exists.
    fn delete_student(&self, student_id: &str) -> Result<bool>;
}

/// Interface for fee structure storage operations
pub trait FeeStructureStorage: Send + Sync {
    /// Append a new fee structure
    fn store_fee_structure(&self, structure: &FeeStructure) -> Result<()>;

    /// Retrieve a fee structure by ID
    fn get_fee_structure(&self, structure_id: &str) -> Result<Option<FeeStructure>>;

    /// List all fee structures in insertion order
    fn list_fee_structures(&self) -> Result<Vec<FeeStructure>>;
}

/// Interface for payment storage operations
pub trait PaymentStorage: Send + Sync {
    /// Append a new payment
    fn store_payment(&self, payment: &Payment) -> Result<()>;

    /// Retrieve a payment by ID
    fn get_payment(&self, payment_id: &str) -> Result<Option<Payment>>;

    /// Retrieve a payment by its receipt number
    fn get_payment_by_receipt(&self, receipt_number: &str) -> Result<Option<Payment>>;

    /// List all payments in insertion order
    fn list_payments(&self) -> Result<Vec<Payment>>;

    /// List the payments referencing a student, in insertion order
    fn list_payments_for_student(&self, student_id: &str) -> Result<Vec<Payment>>;
}
