//! Authentication and session management

pub mod ports;
pub mod service;

pub use ports::{AccessTokenProvider, AuthApi, CredentialStore, StoredTokenProvider};
pub use service::SessionService;
