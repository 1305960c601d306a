//! # VitaPort Domain
//!
//! Business domain types and models for the VitaPort patient portal client.
//!
//! This crate contains:
//! - Records mirrored from the portal backend (patients, doctors,
//!   appointments, insurance cards, documents, waitlist entries)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Shared constants (storage keys, wire messages)
//!
//! ## Architecture
//! - No dependencies on other VitaPort crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
