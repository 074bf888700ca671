use std::net::SocketAddr;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tracing::{error, info};

use crate::handlers::{
    app::{app_info, route_not_found},
    blog::{create_post, delete_post, get_post, list_posts, update_post},
    docs::openapi_document,
    health::health_check,
    metrics::metrics_handler,
};
use crate::middleware::{LoggingLayer, RequestIdLayer};
use crate::state::AppState;

/// Router de la aplicacion sin `/metrics`.
///
/// Las rutas del blog cuelgan de `{prefix}/{version}/blog` segun los
/// [`ApiSettings`](crate::settings::ApiSettings) del estado. Bodies por encima
/// de `max_body_bytes` se rechazan con 413 y el body de error JSON, lleven o no
/// `Content-Length`.
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    with_common_layers(app_routes(state), max_body_bytes)
}

/// Router completo, con el endpoint Prometheus.
pub fn create_router_with_metrics(
    state: AppState,
    max_body_bytes: usize,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    with_common_layers(app_routes(state).merge(metrics_router), max_body_bytes)
}

fn app_routes(state: AppState) -> Router {
    let api = state.api().clone();
    let blog = api.blog_path();
    let blog_item = format!("{blog}/{{id}}");

    Router::new()
        .route("/", get(app_info))
        .route("/health", get(health_check))
        .route(&api.docs_route(), get(openapi_document))
        .route(&blog, get(list_posts).post(create_post))
        .route(
            &blog_item,
            get(get_post).put(update_post).delete(delete_post),
        )
        .fallback(route_not_found)
        .with_state(state)
}

fn with_common_layers(router: Router, max_body_bytes: usize) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(RequestIdLayer)
        .layer(LoggingLayer);

    router
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn(
            crate::metrics::http::http_metrics_middleware,
        ))
        .layer(middleware_stack)
}

/// Serves `app` on `addr` until SIGINT or SIGTERM.
pub async fn run_server(addr: SocketAddr, app: Router) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
