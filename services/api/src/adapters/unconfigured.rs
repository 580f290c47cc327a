//! services/api/src/adapters/unconfigured.rs
//!
//! Stands in for both AI adapters when no API key is configured, so the
//! server still starts and the AI features explain what is missing.

use async_trait::async_trait;
use remed_lakay_core::{
    domain::EncodedImage,
    ports::{AdviceService, PlantIdentificationService, PortError, PortResult},
};

/// Answers every request with `PortError::NotConfigured` without any network call.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnconfiguredGateway;

#[async_trait]
impl AdviceService for UnconfiguredGateway {
    async fn get_text_advice(&self, _query: &str) -> PortResult<String> {
        Err(PortError::NotConfigured)
    }
}

#[async_trait]
impl PlantIdentificationService for UnconfiguredGateway {
    async fn identify_image(&self, _image: &EncodedImage) -> PortResult<String> {
        Err(PortError::NotConfigured)
    }
}
