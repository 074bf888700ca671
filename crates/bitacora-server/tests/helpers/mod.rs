//! Test helpers para bitacora-server.

#![allow(dead_code, unused_imports)]

pub mod app;
pub mod assertions;
pub mod client;

pub use app::{TestApp, memory_state, test_app, test_app_with};
pub use assertions::*;
pub use client::{TestClient, TestResponse};
