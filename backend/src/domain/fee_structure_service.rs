//! Fee structure management.
//!
//! A structure is tied to a class label; a student is billed by the first
//! structure whose class label equals the student's class.

use anyhow::Result;
use shared::{FeeStructure, FeeType};
use tracing::{debug, info, warn};

use crate::domain::commands::fee_structure::CreateFeeStructureCommand;
use crate::domain::identity::generate_record_id;
use crate::storage::{FeeStructureRepository, FeeStructureStorage, MemoryConnection, StudentRepository, StudentStorage};

/// Shown wherever a payment references a fee type no structure contains
pub const UNKNOWN_FEE_NAME: &str = "Unknown Fee";

#[derive(Clone)]
pub struct FeeStructureService {
    fee_structure_repository: FeeStructureRepository,
    student_repository: StudentRepository,
}

impl FeeStructureService {
    pub fn new(connection: MemoryConnection) -> Self {
        Self {
            fee_structure_repository: FeeStructureRepository::new(connection.clone()),
            student_repository: StudentRepository::new(connection),
        }
    }

    /// Add a fee structure with a fresh ID.
    ///
    /// The fee types and total are stored exactly as supplied; the total is
    /// not checked against the fee type amounts.
    pub fn add_fee_structure(&self, command: CreateFeeStructureCommand) -> Result<FeeStructure> {
        let structure = FeeStructure {
            id: generate_record_id(),
            name: command.name,
            class: command.class,
            fee_types: command.fee_types,
            total_amount: command.total_amount,
        };

        let fee_type_total: f64 = structure.fee_types.iter().map(|ft| ft.amount).sum();
        if fee_type_total != structure.total_amount {
            debug!("Fee structure {} total {:.2} differs from fee type sum {:.2}",
                   structure.name, structure.total_amount, fee_type_total);
        }

        self.fee_structure_repository.store_fee_structure(&structure)?;
        info!("💰 FEES: Added fee structure '{}' for class {} (total {:.2}) with ID: {}",
              structure.name, structure.class, structure.total_amount, structure.id);
        Ok(structure)
    }

    pub fn get_fee_structure(&self, structure_id: &str) -> Result<Option<FeeStructure>> {
        self.fee_structure_repository.get_fee_structure(structure_id)
    }

    pub fn list_fee_structures(&self) -> Result<Vec<FeeStructure>> {
        self.fee_structure_repository.list_fee_structures()
    }

    /// First structure whose class label equals `class`
    pub fn find_structure_for_class(&self, class: &str) -> Result<Option<FeeStructure>> {
        let structures = self.fee_structure_repository.list_fee_structures()?;
        Ok(structures.into_iter().find(|fs| fs.class == class))
    }

    /// Find a fee type in any structure
    pub fn find_fee_type(&self, fee_type_id: &str) -> Result<Option<FeeType>> {
        let structures = self.fee_structure_repository.list_fee_structures()?;
        Ok(structures
            .iter()
            .find_map(|fs| fs.fee_type(fee_type_id))
            .cloned())
    }

    /// Display name of a fee type, or "Unknown Fee"
    pub fn fee_type_name(&self, fee_type_id: &str) -> Result<String> {
        Ok(self
            .find_fee_type(fee_type_id)?
            .map(|ft| ft.name)
            .unwrap_or_else(|| UNKNOWN_FEE_NAME.to_string()))
    }

    /// Fee types a payment for this student can be recorded against
    pub fn available_fee_types(&self, student_id: &str) -> Result<Vec<FeeType>> {
        let student = match self.student_repository.get_student(student_id)? {
            Some(student) => student,
            None => {
                warn!("💰 FEES: No fee types available, student not found: {}", student_id);
                return Ok(Vec::new());
            }
        };

        Ok(self
            .find_structure_for_class(&student.class)?
            .map(|fs| fs.fee_types)
            .unwrap_or_default())
    }
}
