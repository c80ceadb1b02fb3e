use anyhow::{anyhow, Result};
use shared::{FeeStructure, Payment, Student};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// The record collections owned by a connection
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub students: Vec<Student>,
    pub fee_structures: Vec<FeeStructure>,
    pub payments: Vec<Payment>,
}

/// Handle to one in-memory fee ledger.
///
/// Every clone shares the same collections. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnection {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryConnection {
    /// Create a new, empty ledger
    pub fn new() -> Self {
        debug!("Creating empty in-memory fee ledger");
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| anyhow!("In-memory fee ledger lock is poisoned"))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| anyhow!("In-memory fee ledger lock is poisoned"))
    }

    /// Record counts as (students, fee structures, payments)
    pub fn counts(&self) -> Result<(usize, usize, usize)> {
        let collections = self.read()?;
        Ok((
            collections.students.len(),
            collections.fee_structures.len(),
            collections.payments.len(),
        ))
    }
}
