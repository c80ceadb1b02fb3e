//! Domain-level command types.
//!
//! These carry already-typed form values into the services. The services
//! store whatever they are given; the `validate` methods mirror the checks
//! the entry forms perform and are left to the caller to run.

/// Required-field failures reported by the form checks
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("At least one fee type is required")]
    NoFeeTypes,
}

fn require(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(())
    }
}

pub mod student {
    use super::{require, FormError};
    use chrono::NaiveDate;
    use shared::Student;

    /// Input for adding a new student.
    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub name: String,
        pub roll_number: String,
        pub class: String,
        pub section: String,
        pub parent_name: String,
        pub parent_contact: String,
        pub email: String,
        pub admission_date: NaiveDate,
    }

    impl CreateStudentCommand {
        /// Check the fields the student form marks as required (email is optional)
        pub fn validate(&self) -> Result<(), FormError> {
            require(&self.name, "Name")?;
            require(&self.roll_number, "Roll number")?;
            require(&self.class, "Class")?;
            require(&self.section, "Section")?;
            require(&self.parent_name, "Parent name")?;
            require(&self.parent_contact, "Parent contact")?;
            Ok(())
        }

        pub(crate) fn into_student(self, id: String) -> Student {
            Student {
                id,
                name: self.name,
                roll_number: self.roll_number,
                class: self.class,
                section: self.section,
                parent_name: self.parent_name,
                parent_contact: self.parent_contact,
                email: self.email,
                admission_date: self.admission_date,
            }
        }
    }

    /// Partial update of a student; `None` fields are left untouched.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateStudentCommand {
        pub name: Option<String>,
        pub roll_number: Option<String>,
        pub class: Option<String>,
        pub section: Option<String>,
        pub parent_name: Option<String>,
        pub parent_contact: Option<String>,
        pub email: Option<String>,
        pub admission_date: Option<NaiveDate>,
    }

    impl UpdateStudentCommand {
        /// Shallow merge of the supplied fields into `student`
        pub fn apply_to(self, student: &mut Student) {
            if let Some(name) = self.name {
                student.name = name;
            }
            if let Some(roll_number) = self.roll_number {
                student.roll_number = roll_number;
            }
            if let Some(class) = self.class {
                student.class = class;
            }
            if let Some(section) = self.section {
                student.section = section;
            }
            if let Some(parent_name) = self.parent_name {
                student.parent_name = parent_name;
            }
            if let Some(parent_contact) = self.parent_contact {
                student.parent_contact = parent_contact;
            }
            if let Some(email) = self.email {
                student.email = email;
            }
            if let Some(admission_date) = self.admission_date {
                student.admission_date = admission_date;
            }
        }
    }
}

pub mod fee_structure {
    use super::{require, FormError};
    use crate::domain::identity::generate_record_id;
    use shared::{FeeCategory, FeeFrequency, FeeType};

    /// Input for adding a fee structure. `total_amount` is stored as given.
    #[derive(Debug, Clone)]
    pub struct CreateFeeStructureCommand {
        pub name: String,
        pub class: String,
        pub fee_types: Vec<FeeType>,
        pub total_amount: f64,
    }

    impl CreateFeeStructureCommand {
        pub fn validate(&self) -> Result<(), FormError> {
            require(&self.name, "Structure name")?;
            require(&self.class, "Class")?;
            if self.fee_types.is_empty() {
                return Err(FormError::NoFeeTypes);
            }
            Ok(())
        }
    }

    /// Accumulates fee types the way the fee structure form does, then
    /// produces a command whose total is the sum of the fee type amounts.
    #[derive(Debug, Clone, Default)]
    pub struct FeeStructureDraft {
        pub name: String,
        pub class: String,
        fee_types: Vec<FeeType>,
    }

    impl FeeStructureDraft {
        pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                class: class.into(),
                fee_types: Vec::new(),
            }
        }

        /// Append a fee type with a fresh ID
        pub fn add_fee_type(
            &mut self,
            name: impl Into<String>,
            amount: f64,
            frequency: FeeFrequency,
            category: FeeCategory,
        ) -> Result<&FeeType, FormError> {
            let name = name.into();
            require(&name, "Fee type name")?;
            if amount <= 0.0 {
                return Err(FormError::NonPositiveAmount);
            }

            self.fee_types.push(FeeType {
                id: generate_record_id(),
                name,
                amount,
                frequency,
                category,
            });
            Ok(&self.fee_types[self.fee_types.len() - 1])
        }

        /// Remove the fee type at `index`; out-of-range indexes are ignored
        pub fn remove_fee_type(&mut self, index: usize) -> Option<FeeType> {
            if index < self.fee_types.len() {
                Some(self.fee_types.remove(index))
            } else {
                None
            }
        }

        pub fn fee_types(&self) -> &[FeeType] {
            &self.fee_types
        }

        pub fn total(&self) -> f64 {
            self.fee_types.iter().map(|ft| ft.amount).sum()
        }

        pub fn into_command(self) -> CreateFeeStructureCommand {
            let total_amount = self.total();
            CreateFeeStructureCommand {
                name: self.name,
                class: self.class,
                fee_types: self.fee_types,
                total_amount,
            }
        }
    }
}

pub mod payment {
    use super::{require, FormError};
    use chrono::NaiveDate;
    use shared::{PaymentMethod, PaymentStatus};

    /// Input for recording a payment. The receipt number is generated.
    #[derive(Debug, Clone)]
    pub struct RecordPaymentCommand {
        pub student_id: String,
        pub fee_type_id: String,
        pub amount: f64,
        pub date: NaiveDate,
        pub method: PaymentMethod,
        pub status: PaymentStatus,
    }

    impl RecordPaymentCommand {
        pub fn validate(&self) -> Result<(), FormError> {
            require(&self.student_id, "Student")?;
            require(&self.fee_type_id, "Fee type")?;
            if self.amount <= 0.0 {
                return Err(FormError::NonPositiveAmount);
            }
            Ok(())
        }
    }
}
