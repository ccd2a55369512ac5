//! Query fetch tasks

use std::sync::Arc;

use super::TaskSpawner;
use crate::app::events::AppEvent;
use crate::app::query::{QueryData, QueryKey};
use crate::core::service::StorefrontApi;

/// Fetch one cache key. The caller has already marked it in flight.
pub(crate) fn fetch_query(spawner: &TaskSpawner, api: Arc<dyn StorefrontApi>, key: QueryKey) {
    tracing::debug!(key = ?key, "Fetching query");
    spawner.spawn("fetch_query", async move {
        let result = match key {
            QueryKey::Products { page } => api.get_products(page).await.map(QueryData::Products),
            QueryKey::Transactions { page } => {
                api.get_transactions(page).await.map(QueryData::Transactions)
            }
            QueryKey::Users => api.get_users().await.map(QueryData::Users),
        };
        AppEvent::QueryLoaded { key, result }
    });
}
