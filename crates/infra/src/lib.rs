//! # VitaPort Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP client (timeout, retry, cancellation)
//! - One REST client per backend resource area
//! - Configuration loading (environment + file)
//! - The file-backed credential store
//!
//! ## Architecture
//! - Implements traits defined in `vitaport-core`
//! - Depends on `vitaport-domain` and `vitaport-core`
//! - Contains all "impure" code (network and file I/O)

pub mod api;
pub mod config;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::{
    AppointmentsClient, AuthClient, DoctorsClient, DocumentsClient, InsuranceClient,
    WaitlistClient,
};
pub use http::HttpClient;
pub use storage::FileCredentialStore;
