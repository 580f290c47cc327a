//! services/api/src/adapters/vision_llm.rs
//!
//! This module contains the adapter for the plant identification (vision) LLM.
//! It implements the `PlantIdentificationService` port from the `core` crate.
//! The photo travels inline, as a `data:` URL, next to a fixed instruction.

const IDENTIFY_INSTRUCTIONS: &str = r#"Ou se yon ekspè nan botanik ak plant medisinal Ayisyen.
Idantifye plant ki nan foto sa a.
Bay non li an Kreyòl, non syantifik li, epi di pou kisa li bon nan medsin tradisyonèl Ayisyen.
Si se pa yon plant, di sa tou.
Toujou raple moun yo pou yo fè atansyon.
Reponn an Kreyòl Ayisyen sèlman."#;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrlArgs,
    },
    Client,
};
use async_trait::async_trait;
use remed_lakay_core::{
    domain::EncodedImage,
    ports::{PlantIdentificationService, PortError, PortResult},
};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `PlantIdentificationService` using a multimodal,
/// OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiVisionAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiVisionAdapter {
    /// Creates a new `OpenAiVisionAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `PlantIdentificationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PlantIdentificationService for OpenAiVisionAdapter {
    async fn identify_image(&self, image: &EncodedImage) -> PortResult<String> {
        debug!(
            "Requesting identification of a {} image ({} base64 chars)",
            image.mime_type,
            image.data.len()
        );

        let image_part = ChatCompletionRequestMessageContentPartImageArgs::default()
            .image_url(
                ImageUrlArgs::default()
                    .url(image.data_url())
                    .detail(ImageDetail::Auto)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            )
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let text_part = ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(IDENTIFY_INSTRUCTIONS)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let content = ChatCompletionRequestUserMessageContent::Array(vec![
            ChatCompletionRequestUserMessageContentPart::ImageUrl(image_part),
            ChatCompletionRequestUserMessageContentPart::Text(text_part),
        ]);

        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into();

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message])
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
