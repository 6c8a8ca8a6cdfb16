use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::MetadataProvider;
use crate::clients::omdb::OmdbClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    ExportService, ListService, MovieService, SeaOrmExportService, SeaOrmListService,
    SeaOrmMovieService,
};

/// Build a shared HTTP client for outbound API calls.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("cinema/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub metadata: Arc<dyn MetadataProvider>,

    pub movie_service: Arc<dyn MovieService>,

    pub list_service: Arc<dyn ListService>,

    pub export_service: Arc<dyn ExportService>,
}

impl SharedState {
    /// Wires the store and services against the OMDB provider from `config`.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.omdb.request_timeout_seconds)?;
        let omdb = OmdbClient::with_shared_client(http_client, &config.omdb)?;

        if config.omdb.api_key.is_empty() {
            tracing::warn!("OMDB API key is not set; searches and lookups will fail");
        }

        Self::with_provider(config, Arc::new(omdb)).await
    }

    /// Same as [`SharedState::new`] with a caller-supplied metadata provider.
    pub async fn with_provider(
        config: Config,
        metadata: Arc<dyn MetadataProvider>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let store_arc = Arc::new(store.clone());

        let movie_service = Arc::new(SeaOrmMovieService::new(store_arc.clone(), metadata.clone()))
            as Arc<dyn MovieService + Send + Sync + 'static>;

        let list_service = Arc::new(SeaOrmListService::new(store_arc.clone()))
            as Arc<dyn ListService + Send + Sync + 'static>;

        let export_service = Arc::new(SeaOrmExportService::new(store_arc))
            as Arc<dyn ExportService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            metadata,
            movie_service,
            list_service,
            export_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
