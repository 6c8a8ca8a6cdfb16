use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::MetadataProvider;
use crate::config::Config;
use crate::domain::UserId;
use crate::state::SharedState;

pub mod auth;
mod error;
mod export;
mod movies;
mod observability;
mod system;
mod types;
mod validation;
mod watched;
mod watchlist;

pub use error::ApiError;
pub use types::*;

use tokio::sync::RwLock;

use crate::services::{ExportService, ListService, MovieService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    /// User every request acts as until real sessions exist.
    pub default_user: UserId,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn list_service(&self) -> &Arc<dyn ListService> {
        &self.shared.list_service
    }

    #[must_use]
    pub fn export_service(&self) -> &Arc<dyn ExportService> {
        &self.shared.export_service
    }
}

pub async fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let default_user = UserId::new(shared.config.read().await.general.default_user_id);

    if shared.store.get_user(default_user.value()).await?.is_none() {
        anyhow::bail!("Default user {default_user} does not exist in the database");
    }

    Ok(Arc::new(AppState {
        shared,
        default_user,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    }))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared, prometheus_handle).await
}

/// Builds state against a caller-supplied metadata provider instead of OMDB.
pub async fn create_app_state_with_provider(
    config: Config,
    provider: Arc<dyn MetadataProvider>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_provider(config, provider).await?);
    create_app_state(shared, prometheus_handle).await
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config().read().await;
        config.server.cors_allowed_origins.clone()
    };

    let api_router = Router::new()
        .route("/movies/search", get(movies::search_movies))
        .route("/movies/{id}", get(movies::get_movie))
        .route(
            "/movies/{id}/move-to-watched",
            post(movies::move_to_watched),
        )
        .route(
            "/watchlist",
            get(watchlist::get_watchlist).post(watchlist::add_to_watchlist),
        )
        .route("/watchlist/order", put(watchlist::update_order))
        .route("/watchlist/reorder", post(watchlist::move_item))
        .route("/watchlist/{id}", delete(watchlist::remove_from_watchlist))
        .route(
            "/watchedlist",
            get(watched::get_watched_list).post(watched::add_to_watched),
        )
        .route("/watchedlist/{id}/review", put(watched::update_review))
        .route("/watchedlist/{id}", delete(watched::remove_from_watched))
        .route("/export/csv", get(export::export_csv))
        .route("/me", get(auth::me))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
}
