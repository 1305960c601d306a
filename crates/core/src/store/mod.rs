//! Central query store
//!
//! The process-wide cache behind every read operation. Query results are
//! cached under explicit keys, registered against resource tags, and
//! evicted when a mutation invalidates those tags. Observers subscribe to
//! invalidation events and refetch their query exactly once per event
//! that touches them.

pub mod observer;
pub mod query_cache;
pub mod tags;

pub use observer::{QueryFetcher, QueryObserver};
pub use query_cache::{Invalidation, QueryCache, StoreConfig};
pub use tags::{QueryKey, Tag};
