//! Appointment scheduling operations

pub mod ports;
pub mod service;

pub use ports::AppointmentsApi;
pub use service::AppointmentsService;
