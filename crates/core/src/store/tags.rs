//! Cache tags and query keys

use std::fmt;

/// Label associated with cached query results
///
/// Mutations invalidate tags; every query registered under an invalidated
/// tag is evicted and its observers refetch. Id-carrying variants scope
/// invalidation to a single entity, list variants to a resource area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The current-user snapshot (profile, favorites, onboarding step)
    User,
    /// The appointment list
    Appointments,
    /// One appointment's detail view
    Appointment(String),
    /// The doctor directory
    Doctors,
    /// One doctor's detail view
    Doctor(String),
    /// The insurance-card list
    Insurance,
    /// The document list
    Documents,
    /// The document-category list
    DocumentCategories,
    /// The waitlist
    Waitlist,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Appointments => f.write_str("appointments"),
            Self::Appointment(id) => write!(f, "appointment:{id}"),
            Self::Doctors => f.write_str("doctors"),
            Self::Doctor(id) => write!(f, "doctor:{id}"),
            Self::Insurance => f.write_str("insurance"),
            Self::Documents => f.write_str("documents"),
            Self::DocumentCategories => f.write_str("document-categories"),
            Self::Waitlist => f.write_str("waitlist"),
        }
    }
}

/// Opaque identifier of one query (path plus significant parameters)
///
/// A key is bound to a single result type for the lifetime of the cache;
/// reading it as another type is an internal error, not a silent shape
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    /// Create a query key
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
