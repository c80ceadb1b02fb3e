//! # Storage Module
//!
//! Holds the record collections behind the domain services.
//!
//! The only backend is an in-memory one: every record lives for the lifetime
//! of the process and is gone on exit. Services never touch the collections
//! directly; they go through the repository types, which implement the
//! storage traits in [`traits`].

pub mod memory;
pub mod traits;

pub use memory::{FeeStructureRepository, MemoryConnection, PaymentRepository, StudentRepository};
pub use traits::*;
