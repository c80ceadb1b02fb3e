//! Payment recording and lookup.

use anyhow::Result;
use shared::{Payment, Student};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::domain::commands::payment::RecordPaymentCommand;
use crate::domain::identity::{generate_record_id, ReceiptNumberGenerator};
use crate::storage::{MemoryConnection, PaymentRepository, PaymentStorage, StudentRepository, StudentStorage};

#[derive(Clone)]
pub struct PaymentService {
    payment_repository: PaymentRepository,
    student_repository: StudentRepository,
    receipt_numbers: ReceiptNumberGenerator,
}

impl PaymentService {
    pub fn new(connection: MemoryConnection, receipt_numbers: ReceiptNumberGenerator) -> Self {
        Self {
            payment_repository: PaymentRepository::new(connection.clone()),
            student_repository: StudentRepository::new(connection),
            receipt_numbers,
        }
    }

    /// Record a payment with a fresh ID and receipt number.
    ///
    /// The student and fee type references are not checked.
    pub fn add_payment(&self, command: RecordPaymentCommand) -> Result<Payment> {
        let payment = Payment {
            id: generate_record_id(),
            student_id: command.student_id,
            fee_type_id: command.fee_type_id,
            amount: command.amount,
            date: command.date,
            method: command.method,
            receipt_number: self.receipt_numbers.next_receipt_number(),
            status: command.status,
        };

        self.payment_repository.store_payment(&payment)?;
        info!("🧾 PAYMENT: Recorded {:.2} ({}, {}) for student {} with receipt {}",
              payment.amount, payment.method, payment.status, payment.student_id, payment.receipt_number);
        Ok(payment)
    }

    pub fn get_payment(&self, payment_id: &str) -> Result<Option<Payment>> {
        self.payment_repository.get_payment(payment_id)
    }

    pub fn get_payment_by_receipt(&self, receipt_number: &str) -> Result<Option<Payment>> {
        self.payment_repository.get_payment_by_receipt(receipt_number)
    }

    /// All payments in the order they were recorded
    pub fn list_payments(&self) -> Result<Vec<Payment>> {
        self.payment_repository.list_payments()
    }

    pub fn payments_for_student(&self, student_id: &str) -> Result<Vec<Payment>> {
        self.payment_repository.list_payments_for_student(student_id)
    }

    pub fn completed_payments_for_student(&self, student_id: &str) -> Result<Vec<Payment>> {
        let payments = self.payment_repository.list_payments_for_student(student_id)?;
        Ok(payments.into_iter().filter(Payment::is_completed).collect())
    }

    /// Payments whose student name or receipt number contains `term` (case-insensitive).
    /// Orphaned payments can only match on receipt number.
    pub fn search_payments(&self, term: &str) -> Result<Vec<Payment>> {
        let needle = term.to_lowercase();
        let names: HashMap<String, String> = self
            .student_repository
            .list_students()?
            .into_iter()
            .map(|s: Student| (s.id, s.name.to_lowercase()))
            .collect();

        let payments = self.payment_repository.list_payments()?;
        let matches: Vec<Payment> = payments
            .into_iter()
            .filter(|p| {
                names.get(&p.student_id).is_some_and(|name| name.contains(&needle))
                    || p.receipt_number.to_lowercase().contains(&needle)
            })
            .collect();

        debug!("Payment search '{}' matched {} payments", term, matches.len());
        Ok(matches)
    }

    /// The `limit` most recent payments, newest first.
    /// Payments on the same date keep their recording order.
    pub fn recent_payments(&self, limit: usize) -> Result<Vec<Payment>> {
        let mut payments = self.payment_repository.list_payments()?;
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        payments.truncate(limit);
        Ok(payments)
    }
}
