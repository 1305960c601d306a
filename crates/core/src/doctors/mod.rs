//! Doctor directory operations

pub mod ports;
pub mod service;

pub use ports::DoctorsApi;
pub use service::DoctorsService;
