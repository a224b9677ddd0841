use crate::config::VisionConfig;
use crate::images_to_text::ImagePayload;
use crate::providers::{ProviderError, VisionProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Anthropic's "overloaded" status code
const OVERLOADED_STATUS: u16 = 529;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    endpoint: String,
}

impl AnthropicProvider {
    /// Create a provider for an already resolved credential
    pub fn new(api_key: String, config: &VisionConfig) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            endpoint: format!("{}/v1/messages", config.base_url.trim_end_matches('/')),
        }
    }

    fn request_body(&self, image: &ImagePayload, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image",
                            "source": {
                                "type": "base64",
                                "media_type": image.media_type,
                                "data": image.data
                            }
                        },
                        {
                            "type": "text",
                            "text": prompt
                        }
                    ]
                }
            ]
        })
    }
}

/// Turn a non-success reply into a provider error, spotting overload.
fn error_from_reply(status: StatusCode, body: &str) -> ProviderError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error_type = parsed
        .as_ref()
        .and_then(|v| v["error"]["type"].as_str())
        .unwrap_or_default()
        .to_string();
    let message = parsed
        .as_ref()
        .and_then(|v| v["error"]["message"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());

    if status.as_u16() == OVERLOADED_STATUS
        || error_type == "overloaded_error"
        || message.to_lowercase().contains("overloaded")
    {
        ProviderError::Overloaded(message)
    } else {
        ProviderError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl VisionProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn read_image(
        &self,
        image: &ImagePayload,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(image, prompt))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_reply(status, &body));
        }

        let response_body: Value =
            serde_json::from_str(&body).map_err(|e| ProviderError::Response(e.to_string()))?;
        debug!("{:?}", response_body);

        response_body["content"]
            .as_array()
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find(|block| block["type"] == "text")
                    .and_then(|block| block["text"].as_str())
            })
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::Response(
                    "Failed to extract content from Anthropic response".to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let provider = AnthropicProvider::new("test-key".to_string(), &VisionConfig::default());
        assert_eq!(provider.provider_name(), "anthropic");
        assert_eq!(provider.endpoint, "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn test_request_body_carries_image_then_prompt() {
        let provider = AnthropicProvider::new("test-key".to_string(), &VisionConfig::default());
        let image = ImagePayload::from_base64("iVBORw0KGgoAAAANSUhEUg==");
        let body = provider.request_body(&image, "read this");

        assert_eq!(body["model"], "claude-sonnet-4-20250514");
        assert_eq!(body["max_tokens"], 2048);
        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["media_type"], "image/png");
        assert_eq!(content[0]["source"]["data"], "iVBORw0KGgoAAAANSUhEUg==");
        assert_eq!(content[1]["text"], "read this");
    }

    #[test]
    fn test_overload_detection() {
        let overloaded = error_from_reply(
            StatusCode::from_u16(529).unwrap(),
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
        );
        assert!(overloaded.is_overloaded());

        let by_type = error_from_reply(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"type":"error","error":{"type":"overloaded_error","message":"busy"}}"#,
        );
        assert!(by_type.is_overloaded());

        let bad_request = error_from_reply(
            StatusCode::BAD_REQUEST,
            r#"{"type":"error","error":{"type":"invalid_request_error","message":"image too large"}}"#,
        );
        assert_eq!(
            bad_request,
            ProviderError::Api {
                status: 400,
                message: "image too large".to_string()
            }
        );
    }
}
