//! # VitaPort API
//!
//! Composition root for the portal client: [`PortalContext`] wires
//! configuration, the HTTP transport, the REST clients, and the query
//! store into the services a consumer calls.
//!
//! ```no_run
//! use vitaport_api::PortalContext;
//!
//! # async fn example() -> vitaport_domain::Result<()> {
//! let config = vitaport_infra::config::load()?;
//! let portal = PortalContext::init(config)?;
//!
//! match portal.session.login("jane@example.com", "hunter2", None).await? {
//!     vitaport_domain::LoginOutcome::Authenticated { onboarding, .. } => {
//!         println!("continue to {}", onboarding.path());
//!     }
//!     vitaport_domain::LoginOutcome::VerificationRequired { redirect } => {
//!         println!("redirect to {redirect}");
//!     }
//! }
//!
//! let upcoming = portal.appointments.upcoming(None).await?;
//! println!("{} upcoming appointments", upcoming.len());
//! # Ok(())
//! # }
//! ```

pub mod context;

pub use context::PortalContext;

// Re-export the items a consumer needs alongside the context.
pub use vitaport_core::{
    AppointmentsService, DoctorsService, DocumentsService, InsuranceService, Invalidation,
    QueryObserver, SessionService, Tag, WaitlistService,
};
pub use vitaport_domain::{Config, LoginOutcome, OnboardingRoute, Result, VitaportError};
pub use vitaport_infra::config::load as load_config;
