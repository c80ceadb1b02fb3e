use anyhow::Result;
use shared::FeeStructure;
use tracing::debug;

use super::connection::MemoryConnection;
use crate::storage::traits::FeeStructureStorage;

/// In-memory fee structure repository
#[derive(Clone)]
pub struct FeeStructureRepository {
    connection: MemoryConnection,
}

impl FeeStructureRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl FeeStructureStorage for FeeStructureRepository {
    fn store_fee_structure(&self, structure: &FeeStructure) -> Result<()> {
        self.connection.write()?.fee_structures.push(structure.clone());
        debug!(
            "Stored fee structure {} with {} fee types",
            structure.id,
            structure.fee_types.len()
        );
        Ok(())
    }

    fn get_fee_structure(&self, structure_id: &str) -> Result<Option<FeeStructure>> {
        let collections = self.connection.read()?;
        Ok(collections
            .fee_structures
            .iter()
            .find(|fs| fs.id == structure_id)
            .cloned())
    }

    fn list_fee_structures(&self) -> Result<Vec<FeeStructure>> {
        Ok(self.connection.read()?.fee_structures.clone())
    }
}
