//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - The extension allow-list
//! - Candidate, record and summary model types
//! - Path resolution and relative display
//! - Two-stage file decoding
//! - Report serialization

pub mod extensions;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
