//! # In-Memory Storage Module
//!
//! All three collections sit behind a single [`MemoryConnection`]. Cloning
//! the connection hands out another handle to the same collections, so the
//! repositories built from one connection always see each other's writes.
//!
//! ## Collections
//!
//! - `students`: insertion ordered
//! - `fee_structures`: insertion ordered, each owning its fee types
//! - `payments`: insertion ordered, referencing students by ID only

pub mod connection;
pub mod fee_structure_repository;
pub mod payment_repository;
pub mod student_repository;

pub use connection::MemoryConnection;
pub use fee_structure_repository::FeeStructureRepository;
pub use payment_repository::PaymentRepository;
pub use student_repository::StudentRepository;
