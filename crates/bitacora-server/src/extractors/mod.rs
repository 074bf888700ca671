//! Extractores de request que validan antes de llegar al handler.
//!
//! Todos rechazan con [`AppError`](crate::error::AppError), asi el cliente
//! recibe siempre el mismo formato de error (400 en vez del 422 de axum).

pub mod json;
pub mod path;
pub mod query;

pub use json::ValidatedJson;
pub use path::PostIdPath;
pub use query::ValidatedQuery;
