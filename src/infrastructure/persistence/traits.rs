//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! This module defines the repository traits (ports) that abstract
//! shipment persistence. Shipments and orders are owned by the embedding
//! system; the provided in-memory implementation serves tests and
//! lightweight embeddings.
//!
//! # Examples
//!
//! ```ignore
//! use commerce_shipping::infrastructure::persistence::traits::ShipmentRepository;
//!
//! async fn count_shipments(repo: &impl ShipmentRepository) {
//!     let count = repo.count().await.unwrap();
//!     println!("{count} shipments stored");
//! }
//! ```

use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::ShipmentId;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for shipment entities.
///
/// Provides persistence operations for shipments. Dangling references
/// are a normal condition: `load_many` silently skips IDs that no longer
/// resolve, and order processing guards against an all-dangling result.
#[async_trait]
pub trait ShipmentRepository: Send + Sync + fmt::Debug {
    /// Saves a shipment.
    ///
    /// If the shipment already exists, it will be updated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    async fn save(&self, shipment: &Shipment) -> RepositoryResult<()>;

    /// Gets a shipment by ID.
    ///
    /// Returns `None` if the shipment does not exist.
    async fn get(&self, id: &ShipmentId) -> RepositoryResult<Option<Shipment>>;

    /// Loads the shipments for the given IDs, preserving input order.
    ///
    /// IDs that do not resolve are skipped; the result may be shorter
    /// than the input.
    async fn load_many(&self, ids: &[ShipmentId]) -> RepositoryResult<Vec<Shipment>>;

    /// Deletes a shipment by ID.
    ///
    /// Returns `Ok(true)` if the shipment was deleted, `Ok(false)` if it
    /// didn't exist.
    async fn delete(&self, id: &ShipmentId) -> RepositoryResult<bool>;

    /// Deletes the shipments for the given IDs, returning how many
    /// existed.
    async fn delete_many(&self, ids: &[ShipmentId]) -> RepositoryResult<usize>;

    /// Counts all shipments.
    async fn count(&self) -> RepositoryResult<u64>;
}
