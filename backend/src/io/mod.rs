//! # IO Module
//!
//! Delivery of generated documents to the outside world. The fee desk has
//! no network surface; its only outputs are the exported text files.

pub mod export;

pub use export::*;
