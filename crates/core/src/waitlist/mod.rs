//! Waitlist operations

pub mod ports;
pub mod service;

pub use ports::WaitlistApi;
pub use service::WaitlistService;
