use super::{parse_recipe_response, ImagePayload};
use crate::config::VisionConfig;
use crate::error::VisionError;
use crate::model::VisionRecipe;
use crate::providers::{
    complete_with_retry, AnthropicProvider, RetryPolicy, VisionProvider, RECIPE_SCAN_PROMPT,
};
use log::{debug, error};

/// Reads a recipe out of a photo with a vision model.
pub struct VisionExtractor {
    config: VisionConfig,
}

impl VisionExtractor {
    pub fn new(config: VisionConfig) -> Self {
        Self { config }
    }

    /// Extract a recipe from `image`, crediting it to `author`.
    ///
    /// The credential is checked before any client is created, so a missing
    /// key fails without touching the network.
    pub async fn extract(
        &self,
        image: &ImagePayload,
        author: &str,
    ) -> Result<VisionRecipe, VisionError> {
        let api_key = self.config.resolve_api_key().ok_or_else(|| {
            error!("No vision API key configured");
            VisionError::MissingCredential
        })?;
        let provider = AnthropicProvider::new(api_key, &self.config);
        self.extract_with(&provider, image, author).await
    }

    /// Same as [`extract`](Self::extract) against a caller-supplied provider.
    pub async fn extract_with(
        &self,
        provider: &dyn VisionProvider,
        image: &ImagePayload,
        author: &str,
    ) -> Result<VisionRecipe, VisionError> {
        debug!(
            "Scanning {} image ({} base64 chars) for {}",
            image.media_type,
            image.data.len(),
            author
        );
        let policy = RetryPolicy::from_config(&self.config);
        let reply = complete_with_retry(provider, image, RECIPE_SCAN_PROMPT, &policy).await?;
        parse_recipe_response(&reply, author)
    }
}
