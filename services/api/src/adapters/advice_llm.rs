//! services/api/src/adapters/advice_llm.rs
//!
//! This module contains the adapter for the advisory chat LLM ("Doktè Fèy AI").
//! It implements the `AdviceService` port from the `core` crate.

const SYSTEM_INSTRUCTIONS: &str = r#"Ou se "Doktè Fèy AI", yon ekspè nan medsin tradisyonèl Ayisyen ak plant medisinal Ayiti.
Moun yo ap vin mande w konsèy sou maladi ak plant.
Toujou reponn an Kreyòl Ayisyen.
Toujou kòmanse ak yon avètisman ke ou se yon AI epi yo dwe wè yon doktè reyèl si ka a grav.
Bay enfòmasyon sou fason pou prepare remèd yo selon kilti Ayisyen (bouyi, tranpe, elatriye)."#;

const TEMPERATURE: f32 = 0.7;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use remed_lakay_core::ports::{AdviceService, PortError, PortResult};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AdviceService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiAdviceAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiAdviceAdapter {
    /// Creates a new `OpenAiAdviceAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `AdviceService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AdviceService for OpenAiAdviceAdapter {
    /// Answers a user's question with the fixed persona and locale.
    async fn get_text_advice(&self, query: &str) -> PortResult<String> {
        debug!("Requesting advice from model {}", self.model);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(query)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(TEMPERATURE)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // An empty answer is not an error here; the chat flow decides what to show.
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
