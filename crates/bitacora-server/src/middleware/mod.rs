//! Middleware de Tower comun a todas las rutas.
//!
//! - `RequestIdLayer`: asigna o propaga `x-request-id`
//! - `LoggingLayer`: una linea de log por request, dentro de un span con el id

mod logging;
mod request_id;

pub use logging::{LoggingLayer, LoggingMiddleware};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, RequestIdMiddleware};
