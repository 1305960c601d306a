//! Domain data types
//!
//! Records mirrored from the portal backend. All entities carry
//! backend-assigned opaque string ids; the client never generates ids.

pub mod appointment;
pub mod doctor;
pub mod document;
pub mod insurance;
pub mod patient;
pub mod session;
pub mod upload;
pub mod waitlist;

pub use appointment::*;
pub use doctor::*;
pub use document::*;
pub use insurance::*;
pub use patient::*;
pub use session::*;
pub use upload::*;
pub use waitlist::*;
