//! # VitaPort Core
//!
//! Portal business logic over abstract ports.
//!
//! This crate contains:
//! - Port interfaces (async traits) for every backend resource area
//! - The tag-invalidated query cache and query observers
//! - Per-resource services enforcing the validation and
//!   cache-invalidation contracts
//!
//! ## Architecture
//! - Defines traits implemented by `vitaport-infra`
//! - No HTTP or storage I/O of its own
//! - Every mutation states its invalidation set in one place: its service
//!   method

pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod documents;
pub mod insurance;
pub mod store;
pub mod validate;
pub mod waitlist;

// Re-export commonly used items
pub use appointments::{AppointmentsApi, AppointmentsService};
pub use auth::{
    AccessTokenProvider, AuthApi, CredentialStore, SessionService, StoredTokenProvider,
};
pub use doctors::{DoctorsApi, DoctorsService};
pub use documents::{DocumentsApi, DocumentsService};
pub use insurance::{InsuranceApi, InsuranceService};
pub use store::{Invalidation, QueryCache, QueryFetcher, QueryKey, QueryObserver, StoreConfig, Tag};
pub use waitlist::{WaitlistApi, WaitlistService};
