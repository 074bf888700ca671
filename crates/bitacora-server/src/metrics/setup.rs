//! Metrics setup and initialization.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusRecorder};
use tracing::info;

use super::{cache::register_cache_metrics, http::register_http_metrics};

/// Buckets de histogramas, en segundos.
const BUCKETS: &[f64] = &[
    0.0001, // 100 microsegundos
    0.0005, // 500 microsegundos
    0.001,  // 1 milisegundo
    0.0025, // 2.5 milisegundos
    0.005,  // 5 milisegundos
    0.01,   // 10 milisegundos
    0.025,  // 25 milisegundos
    0.05,   // 50 milisegundos
    0.1,    // 100 milisegundos
    0.25,   // 250 milisegundos
    0.5,    // 500 milisegundos
    1.0,    // 1 segundo
    2.5,    // 2.5 segundos
    5.0,    // 5 segundos
];

/// Construye un recorder Prometheus sin instalarlo globalmente.
pub fn build_recorder() -> Result<PrometheusRecorder, BuildError> {
    Ok(PrometheusBuilder::new()
        .set_buckets(BUCKETS)?
        .build_recorder())
}

/// Instala el recorder global y retorna el handle para el endpoint `/metrics`.
pub fn init_metrics() -> Result<metrics_exporter_prometheus::PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets(BUCKETS)?
        .install_recorder()?;

    register_cache_metrics();
    register_http_metrics();

    info!("Metrics system initialized");
    Ok(handle)
}
