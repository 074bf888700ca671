//! Bitacora server binary.

use std::sync::Arc;

use anyhow::Context;
use bitacora_server::{
    AppState, CacheGateway, CacheStore, MemoryCache, PostService, RedisCache,
    create_router_with_metrics, metrics, run_server,
    settings::{self, CacheBackend, CacheSettings, DatabaseBackend, DatabaseSettings},
    telemetry,
};
use bitacora_store::{MemoryPostStore, PgPostStore, PostStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = settings::load().context("failed to load configuration")?;

    telemetry::init(&settings.logging).context("failed to initialize tracing")?;
    let prometheus = metrics::init_metrics().context("failed to install metrics recorder")?;

    info!(
        version = bitacora_server::version(),
        environment = %settings.environment,
        "Starting Bitacora server"
    );

    let store = build_store(&settings.database).await?;
    let cache = build_cache(&settings.cache).await?;
    info!(store = store.name(), cache = cache.name(), "Backends ready");

    let gateway = CacheGateway::new(cache, settings.cache.ttl);
    let service = PostService::new(store, gateway);
    let state = AppState::new(service, settings.api.clone(), settings.environment);

    let app = create_router_with_metrics(state, settings.server.max_body_bytes, prometheus);
    run_server(settings.server.addr, app)
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn build_store(database: &DatabaseSettings) -> anyhow::Result<Arc<dyn PostStore>> {
    match database.backend {
        DatabaseBackend::Postgres => {
            let store = PgPostStore::connect(
                database.connect_options.clone(),
                database.max_connections.get(),
            )
            .await
            .context("failed to connect to PostgreSQL")?;

            if database.run_migrations {
                store
                    .run_migrations()
                    .await
                    .context("failed to run migrations")?;
            }

            Ok(Arc::new(store))
        }
        DatabaseBackend::Memory => Ok(Arc::new(MemoryPostStore::new())),
    }
}

async fn build_cache(cache: &CacheSettings) -> anyhow::Result<Arc<dyn CacheStore>> {
    match cache.backend {
        CacheBackend::Redis => {
            let redis = RedisCache::connect(&cache.url, cache.namespace.clone())
                .await
                .context("failed to connect to Redis")?;
            Ok(Arc::new(redis))
        }
        CacheBackend::Memory => Ok(Arc::new(MemoryCache::new(cache.max_capacity))),
    }
}
