use axum::extract::State;
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus text exposition of every registered metric.
pub async fn metrics_handler(State(prometheus): State<PrometheusHandle>) -> String {
    prometheus.render()
}
