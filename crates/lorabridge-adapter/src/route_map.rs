//! Route map repository - identity translation tables.
//!
//! A route map associates one *external* identifier (a device EUI or a LoRa
//! application ID) with one *internal* identifier (a thing or channel ID).
//! Two independent instances exist side by side, one per identity pair; they
//! never share a namespace.
//!
//! Lookups are always by external key (the per-message hot path). Removal is
//! keyed by the internal identifier instead, so implementations must be able
//! to resolve entries by value as well.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use lorabridge_core::{Error, Result};

/// Durable external-key → internal-identifier association.
///
/// Implementations must be safe for concurrent use by multiple callers.
#[async_trait]
pub trait RouteMapRepository: Send + Sync {
    /// Internal identifier mapped to `external_key`.
    ///
    /// Fails with [`Error::NotFound`] when no association exists.
    async fn get(&self, external_key: &str) -> Result<String>;

    /// Insert or overwrite the association for `external_key`. Idempotent.
    ///
    /// Fails with [`Error::StoreUnavailable`] when the backing store is
    /// unreachable.
    async fn save(&self, external_key: &str, internal_id: &str) -> Result<()>;

    /// Delete the association whose internal identifier is `internal_id`.
    ///
    /// Removing an identifier with no association is a no-op, not an error.
    async fn remove(&self, internal_id: &str) -> Result<()>;
}

/// In-memory route map, for tests and single-process deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouteMap {
    routes: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryRouteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored associations.
    pub async fn len(&self) -> usize {
        self.routes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.routes.read().await.is_empty()
    }
}

#[async_trait]
impl RouteMapRepository for MemoryRouteMap {
    async fn get(&self, external_key: &str) -> Result<String> {
        self.routes
            .read()
            .await
            .get(external_key)
            .cloned()
            .ok_or_else(|| Error::NotFound(external_key.to_string()))
    }

    async fn save(&self, external_key: &str, internal_id: &str) -> Result<()> {
        self.routes
            .write()
            .await
            .insert(external_key.to_string(), internal_id.to_string());
        Ok(())
    }

    async fn remove(&self, internal_id: &str) -> Result<()> {
        self.routes
            .write()
            .await
            .retain(|_, stored| stored != internal_id);
        Ok(())
    }
}
