//! crates/remed_lakay_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete AI provider and of how reference data is stored.

use async_trait::async_trait;
use std::time::Duration;

use crate::catalogue::Catalogue;
use crate::domain::EncodedImage;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (network, quota, files).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// No credentials are configured for the AI gateway.
    #[error("The AI gateway is not configured")]
    NotConfigured,
    #[error("The call did not complete within {0:?}")]
    Timeout(Duration),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Answers a free-text question with advice in the app's locale.
    async fn get_text_advice(&self, query: &str) -> PortResult<String>;
}

#[async_trait]
pub trait PlantIdentificationService: Send + Sync {
    /// Describes the plant shown in the image.
    async fn identify_image(&self, image: &EncodedImage) -> PortResult<String>;
}

#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    /// Supplies the immutable plant and disease collections.
    async fn load_catalogue(&self) -> PortResult<Catalogue>;
}
