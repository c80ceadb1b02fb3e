use anyhow::Result;
use shared::Payment;
use tracing::debug;

use super::connection::MemoryConnection;
use crate::storage::traits::PaymentStorage;

/// In-memory payment repository
#[derive(Clone)]
pub struct PaymentRepository {
    connection: MemoryConnection,
}

impl PaymentRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl PaymentStorage for PaymentRepository {
    fn store_payment(&self, payment: &Payment) -> Result<()> {
        self.connection.write()?.payments.push(payment.clone());
        debug!("Stored payment {} ({})", payment.id, payment.receipt_number);
        Ok(())
    }

    fn get_payment(&self, payment_id: &str) -> Result<Option<Payment>> {
        let collections = self.connection.read()?;
        Ok(collections.payments.iter().find(|p| p.id == payment_id).cloned())
    }

    fn get_payment_by_receipt(&self, receipt_number: &str) -> Result<Option<Payment>> {
        let collections = self.connection.read()?;
        Ok(collections
            .payments
            .iter()
            .find(|p| p.receipt_number == receipt_number)
            .cloned())
    }

    fn list_payments(&self) -> Result<Vec<Payment>> {
        Ok(self.connection.read()?.payments.clone())
    }

    fn list_payments_for_student(&self, student_id: &str) -> Result<Vec<Payment>> {
        let collections = self.connection.read()?;
        Ok(collections
            .payments
            .iter()
            .filter(|p| p.student_id == student_id)
            .cloned()
            .collect())
    }
}
