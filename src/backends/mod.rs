//! Backends module - File system operations
//!
//! Provides:
//! - scan: Recursive candidate discovery with walkdir

pub mod scan;
