//! Insurance card operations

pub mod ports;
pub mod service;

pub use ports::InsuranceApi;
pub use service::InsuranceService;
