//! App de pruebas con backends en memoria.

use std::sync::Arc;
use std::time::Duration;

use bitacora_server::{
    AppState, CacheGateway, Environment, MemoryCache, PostService, create_router,
    settings::ApiSettings,
};
use bitacora_store::MemoryPostStore;

use super::client::TestClient;

pub const TEST_MAX_BODY_BYTES: usize = 16 * 1024;

/// Router sobre `MemoryPostStore` y `MemoryCache`, mas accesos a ambos.
pub struct TestApp {
    pub client: TestClient,
    pub store: Arc<MemoryPostStore>,
    pub cache: Arc<MemoryCache>,
}

pub fn test_app() -> TestApp {
    test_app_with(ApiSettings::default())
}

pub fn test_app_with(api: ApiSettings) -> TestApp {
    let (state, store, cache) = memory_state(api);

    TestApp {
        client: TestClient::new(create_router(state, TEST_MAX_BODY_BYTES)),
        store,
        cache,
    }
}

/// Estado con backends en memoria, para montar routers a medida.
pub fn memory_state(api: ApiSettings) -> (AppState, Arc<MemoryPostStore>, Arc<MemoryCache>) {
    let store = Arc::new(MemoryPostStore::new());
    let cache = Arc::new(MemoryCache::new(1_000));

    let gateway = CacheGateway::new(cache.clone(), Duration::from_secs(60));
    let service = PostService::new(store.clone(), gateway);
    let state = AppState::new(service, api, Environment::Test);

    (state, store, cache)
}
