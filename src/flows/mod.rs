//! Flows module - Multi-step operations built on the backends
//!
//! Provides:
//! - aggregate: Scan, decode and concatenate files into a single report

pub mod aggregate;
