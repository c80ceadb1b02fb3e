//! Identifier generation for records and receipts.
//!
//! Record IDs are random UUIDs. Receipt numbers keep the short
//! `<prefix><6 digits>` shape taken from the millisecond clock, but are
//! issued through [`ReceiptNumberGenerator`] so that two receipts issued in
//! the same millisecond still differ.

use chrono::Utc;
use std::sync::{Arc, Mutex};

const RECEIPT_SUFFIX_MODULUS: u64 = 1_000_000;

/// Generate a fresh, collision-resistant record ID
pub fn generate_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Issues receipt numbers in format: "<prefix><6 digits>"
///
/// Clones share the last issued suffix.
#[derive(Debug, Clone)]
pub struct ReceiptNumberGenerator {
    prefix: String,
    last_suffix: Arc<Mutex<Option<u64>>>,
}

impl ReceiptNumberGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last_suffix: Arc::new(Mutex::new(None)),
        }
    }

    /// Issue the next receipt number based on the current time
    pub fn next_receipt_number(&self) -> String {
        self.next_at(Utc::now().timestamp_millis().max(0) as u64)
    }

    /// Issue the next receipt number for a given epoch-millisecond clock reading.
    ///
    /// The suffix is the last six digits of the clock unless that would not
    /// be greater than the previously issued suffix, in which case the
    /// previous suffix + 1 is used.
    pub fn next_at(&self, epoch_millis: u64) -> String {
        let mut last = self
            .last_suffix
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let candidate = epoch_millis % RECEIPT_SUFFIX_MODULUS;
        let suffix = match *last {
            Some(previous) if candidate <= previous => (previous + 1) % RECEIPT_SUFFIX_MODULUS,
            _ => candidate,
        };
        *last = Some(suffix);

        format!("{}{:06}", self.prefix, suffix)
    }
}

impl Default for ReceiptNumberGenerator {
    fn default() -> Self {
        Self::new("RCP")
    }
}
