//! HTTP handlers.

pub mod app;
pub mod blog;
pub mod docs;
pub mod health;
pub mod metrics;
pub mod request;
pub mod response;
