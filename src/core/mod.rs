//! Core Module - Deadline Engine
//!
//! Otak aplikasi: parsing tanggal dan penentuan batas waktu (overdue).
//! Pure functions only, no I/O and no shared mutable state.

pub mod date_parser;
pub mod deadline_policy;

pub use date_parser::*;
pub use deadline_policy::*;
