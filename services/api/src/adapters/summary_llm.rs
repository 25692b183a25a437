//! services/api/src/adapters/summary_llm.rs
//!
//! This module contains the adapters for the summary-generating LLM.
//! They implement the `SummaryProvider` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client, error::OpenAIError,
};
use async_trait::async_trait;
use lecture_tracker_core::ports::{PortError, PortResult, SummaryProvider};
use std::time::Duration;
use tracing::debug;

use crate::config::SummaryProviderConfig;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `SummaryProvider` using an OpenAI-compatible chat endpoint.
#[derive(Clone)]
pub struct OpenAiSummaryAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Option<Duration>,
}

impl OpenAiSummaryAdapter {
    /// Creates a new `OpenAiSummaryAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, timeout: Option<Duration>) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }

    /// Builds the client for the configured endpoint.
    pub fn from_config(config: &SummaryProviderConfig, timeout: Option<Duration>) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.clone())
            .with_api_base(config.api_base.clone());
        Self::new(Client::with_config(openai_config), config.model.clone(), timeout)
    }

    async fn complete(&self, prompt: &str) -> PortResult<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Provider(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Provider(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Provider(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                PortError::Provider("Summary LLM returned no choices in its response.".to_string())
            })?
            .message
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                PortError::Provider("Summary LLM response contained no text content.".to_string())
            })?;

        Ok(content)
    }
}

//=========================================================================================
// `SummaryProvider` Trait Implementations
//=========================================================================================

#[async_trait]
impl SummaryProvider for OpenAiSummaryAdapter {
    async fn generate_summary(&self, prompt: &str) -> PortResult<String> {
        debug!("Requesting summary from model {}", self.model);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.complete(prompt))
                .await
                .map_err(|_| {
                    PortError::Provider(format!("Summary LLM did not answer within {:?}", limit))
                })?,
            None => self.complete(prompt).await,
        }
    }
}

/// Stands in for the LLM when no API key is configured. Every request fails.
#[derive(Clone, Debug, Default)]
pub struct UnconfiguredSummaryProvider;

#[async_trait]
impl SummaryProvider for UnconfiguredSummaryProvider {
    async fn generate_summary(&self, _prompt: &str) -> PortResult<String> {
        Err(PortError::Provider(
            "No summary provider is configured (set GEMINI_API_KEY or OPENAI_API_KEY)".to_string(),
        ))
    }
}
