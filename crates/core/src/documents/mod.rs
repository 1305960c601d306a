//! Patient document operations

pub mod ports;
pub mod service;

pub use ports::DocumentsApi;
pub use service::DocumentsService;
