use crate::db::Store;
use crate::domain::{ListScope, UserId};
use crate::services::export_service::{ExportError, ExportService, render_csv};
use std::sync::Arc;
use tracing::info;

pub struct SeaOrmExportService {
    store: Arc<Store>,
}

impl SeaOrmExportService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl ExportService for SeaOrmExportService {
    async fn export_csv(&self, user: UserId, scope: ListScope) -> Result<String, ExportError> {
        let watchlist = if scope.includes_watchlist() {
            self.store.get_watchlist(user.value()).await?
        } else {
            Vec::new()
        };

        let watched = if scope.includes_watched() {
            self.store.get_watched_list(user.value()).await?
        } else {
            Vec::new()
        };

        info!(
            user = %user,
            ?scope,
            rows = watchlist.len() + watched.len(),
            "Exporting lists as CSV"
        );

        render_csv(&watchlist, &watched)
    }
}
