mod anthropic;
mod prompt;
mod retry;

pub use anthropic::AnthropicProvider;
pub use prompt::RECIPE_SCAN_PROMPT;
pub use retry::{complete_with_retry, RetryPolicy};

use crate::images_to_text::ImagePayload;
use async_trait::async_trait;
use thiserror::Error;

/// Raw provider failures, before they are turned into user-facing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The service is over capacity; the request may succeed later
    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response: {0}")]
    Response(String),
}

impl ProviderError {
    pub fn is_overloaded(&self) -> bool {
        matches!(self, ProviderError::Overloaded(_))
    }
}

/// A multimodal model that can read text out of an image.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Get the provider name (e.g., "anthropic")
    fn provider_name(&self) -> &str;

    /// Send one image and one instruction, return the model's text reply.
    async fn read_image(&self, image: &ImagePayload, prompt: &str)
        -> Result<String, ProviderError>;
}
