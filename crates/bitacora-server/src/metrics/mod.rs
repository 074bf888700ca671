//! Metrics for the Bitacora server.
//!
//! Everything is recorded through the `metrics` facade. The binary installs a
//! Prometheus recorder and exposes it on `/metrics`; without a recorder the
//! calls are no-ops.

pub mod cache;
pub mod http;
pub mod setup;

pub use cache::CacheMetrics;
pub use setup::{build_recorder, init_metrics};
