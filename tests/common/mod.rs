#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::sync::Once;

use shortlink_core::application::services::ShortenerService;
use shortlink_core::config::LinkSchema;
use shortlink_core::domain::codec::Base36Codec;
use shortlink_core::infrastructure::persistence::{MemoryLinkStore, SqliteLinkStore};

pub const BASE_URL: &str = "https://sho.rt";

static TRACING: Once = Once::new();

/// Installs a log subscriber once; `RUST_LOG` controls test verbosity.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub fn public_url(token: &str) -> String {
    format!("{BASE_URL}/{token}")
}

pub fn memory_service() -> (
    Arc<MemoryLinkStore>,
    ShortenerService<MemoryLinkStore, Base36Codec>,
) {
    let store = Arc::new(MemoryLinkStore::new());
    let service = ShortenerService::new(Arc::clone(&store), Arc::new(Base36Codec), BASE_URL);
    (store, service)
}

/// An in-memory SQLite database lives inside its one connection, so the pool
/// must keep that connection alive for the whole test.
pub async fn sqlite_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

pub async fn sqlite_store(schema: &LinkSchema) -> Arc<SqliteLinkStore> {
    let pool = Arc::new(sqlite_pool().await);
    let store = SqliteLinkStore::new(pool, schema);
    store.ensure_schema().await.unwrap();
    Arc::new(store)
}
