//! # Domain Module
//!
//! Business logic for the school fee desk.
//!
//! ## Module Organization
//!
//! - **student_service**: Adding, merging, removing and searching students
//! - **fee_structure_service**: Fee structures and fee type lookups
//! - **payment_service**: Recording payments and receipt numbers
//! - **dues_service**: Outstanding dues per student
//! - **dashboard_service**: Headline totals for the dashboard
//! - **invoice**: Receipt and invoice text
//! - **commands**: Typed inputs for the services, plus form checks
//! - **identity**: Record ID and receipt number generation
//! - **sample_data**: The records a fresh desk is seeded with
//!
//! ## Business Rules
//!
//! - A student is billed by the first fee structure with the same class label
//! - Only completed payments count towards what a student has paid
//! - Dues are derived on every query and never stored
//! - Lookups that find nothing return `None`, `false`, zero or an empty list

pub mod commands;
pub mod dashboard_service;
pub mod dues_service;
pub mod fee_structure_service;
pub mod identity;
pub mod invoice;
pub mod payment_service;
pub mod sample_data;
pub mod student_service;

#[cfg(test)]
pub mod test_utils;

pub use commands::*;
pub use dashboard_service::*;
pub use dues_service::*;
pub use fee_structure_service::*;
pub use identity::*;
pub use invoice::*;
pub use payment_service::*;
pub use student_service::*;
