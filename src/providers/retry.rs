use crate::config::VisionConfig;
use crate::error::VisionError;
use crate::images_to_text::ImagePayload;
use crate::providers::VisionProvider;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::sleep;

/// How often and how patiently to retry an overloaded provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait after the first overloaded attempt; doubles for every later one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &VisionConfig) -> Self {
        Self {
            max_attempts: config.retry_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Wait before the retry that follows attempt `attempt_index` (0-based):
    /// `base * 2^attempt_index`.
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt_index))
    }
}

/// Call the provider, retrying only while it reports overload.
///
/// Any other failure is returned at once. Overload on the last attempt
/// becomes [`VisionError::ServiceOverloaded`].
pub async fn complete_with_retry(
    provider: &dyn VisionProvider,
    image: &ImagePayload,
    prompt: &str,
    policy: &RetryPolicy,
) -> Result<String, VisionError> {
    let attempts = policy.max_attempts.max(1);

    for attempt in 0..attempts {
        debug!(
            "Reading image with {} (attempt {}/{})",
            provider.provider_name(),
            attempt + 1,
            attempts
        );

        match provider.read_image(image, prompt).await {
            Ok(reply) => {
                info!(
                    "Successfully read recipe image using {}",
                    provider.provider_name()
                );
                return Ok(reply);
            }
            Err(e) if e.is_overloaded() => {
                if attempt + 1 < attempts {
                    let delay = policy.delay_for(attempt);
                    warn!(
                        "{} overloaded, waiting {:?} before retry {}/{}",
                        provider.provider_name(),
                        delay,
                        attempt + 2,
                        attempts
                    );
                    sleep(delay).await;
                }
            }
            Err(e) => {
                warn!("{} failed: {}", provider.provider_name(), e);
                return Err(VisionError::Provider {
                    detail: e.to_string(),
                });
            }
        }
    }

    warn!(
        "{} still overloaded after {} attempts",
        provider.provider_name(),
        attempts
    );
    Err(VisionError::ServiceOverloaded)
}
