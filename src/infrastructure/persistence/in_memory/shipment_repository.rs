//! # In-Memory Shipment Repository
//!
//! In-memory implementation of [`ShipmentRepository`] for testing.
//!
//! This implementation uses a thread-safe `HashMap` for storage,
//! making it suitable for unit tests without database dependencies.

use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::ShipmentId;
use crate::infrastructure::persistence::traits::{RepositoryResult, ShipmentRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ShipmentRepository`].
///
/// Uses a thread-safe `HashMap` for storage. Suitable for unit tests
/// without database dependencies.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShipmentRepository {
    storage: Arc<RwLock<HashMap<ShipmentId, Shipment>>>,
}

impl InMemoryShipmentRepository {
    /// Creates a new empty in-memory shipment repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all shipments from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
    async fn save(&self, shipment: &Shipment) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(shipment.id(), shipment.clone());
        Ok(())
    }

    async fn get(&self, id: &ShipmentId) -> RepositoryResult<Option<Shipment>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn load_many(&self, ids: &[ShipmentId]) -> RepositoryResult<Vec<Shipment>> {
        let storage = self.storage.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| storage.get(id).cloned())
            .collect())
    }

    async fn delete(&self, id: &ShipmentId) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.remove(id).is_some())
    }

    async fn delete_many(&self, ids: &[ShipmentId]) -> RepositoryResult<usize> {
        let mut storage = self.storage.write().await;
        Ok(ids
            .iter()
            .filter(|id| storage.remove(id).is_some())
            .count())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}
