//! Outstanding dues for a student.
//!
//! Dues are never stored. Every query rescans the current collections:
//! the student, the first fee structure for the student's class, and the
//! student's completed payments. The result is a single lifetime balance
//! and is not floored, so overpayment yields a negative figure.

use anyhow::Result;
use shared::Payment;
use tracing::debug;

use crate::storage::{
    FeeStructureRepository, FeeStructureStorage, MemoryConnection, PaymentRepository, PaymentStorage,
    StudentRepository, StudentStorage,
};

#[derive(Clone)]
pub struct DuesService {
    student_repository: StudentRepository,
    fee_structure_repository: FeeStructureRepository,
    payment_repository: PaymentRepository,
}

impl DuesService {
    pub fn new(connection: MemoryConnection) -> Self {
        Self {
            student_repository: StudentRepository::new(connection.clone()),
            fee_structure_repository: FeeStructureRepository::new(connection.clone()),
            payment_repository: PaymentRepository::new(connection),
        }
    }

    /// Structure total minus completed payments; 0 when the student or a
    /// matching structure is missing
    pub fn get_student_dues(&self, student_id: &str) -> Result<f64> {
        let student = match self.student_repository.get_student(student_id)? {
            Some(student) => student,
            None => {
                debug!("No dues for unknown student {}", student_id);
                return Ok(0.0);
            }
        };

        let structures = self.fee_structure_repository.list_fee_structures()?;
        let structure = match structures.iter().find(|fs| fs.class == student.class) {
            Some(structure) => structure,
            None => {
                debug!("No fee structure for class {}, dues are 0", student.class);
                return Ok(0.0);
            }
        };

        let payments = self.payment_repository.list_payments_for_student(student_id)?;
        let paid = total_completed(&payments);
        let dues = structure.total_amount - paid;

        debug!("Dues for {}: {:.2} - {:.2} = {:.2}", student.name, structure.total_amount, paid, dues);
        Ok(dues)
    }
}

/// Sum of the completed payments in `payments`
pub fn total_completed(payments: &[Payment]) -> f64 {
    payments
        .iter()
        .filter(|p| p.is_completed())
        .map(|p| p.amount)
        .sum()
}
