//! Per-category analytics over a pluggable event store.
//!
//! Three read-only operations, each a fixed fan-out of concurrent store
//! reads joined before returning:
//!
//! - [`metrics::compute_metrics`] -- monthly field/event counts and first ping
//! - [`listing::query_events`] -- one page of events plus window totals
//! - [`poller::has_events`] -- cheap "anything yet?" check
//!
//! The store is abstracted by [`store::EventStore`]; [`pg::PgEventStore`]
//! backs production and [`memory::MemoryEventStore`] backs tests.

pub mod error;
pub mod listing;
pub mod memory;
pub mod metrics;
pub mod pg;
pub mod poller;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::AnalyticsError;
pub use store::{EventStore, StoreError};
