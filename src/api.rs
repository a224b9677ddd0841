//! Framework-agnostic request and response shapes for an HTTP front end.
//!
//! A web layer deserializes the request bodies, calls [`handle_extract`] or
//! [`handle_scan`] and relays the envelope with [`ApiResponse::status_code`].

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::builder::DEFAULT_AUTHOR;
use crate::config::AppConfig;
use crate::images_to_text::ImageSource;
use crate::model::{RecipeRecord, VisionRecipe};
use crate::pipelines;

/// Body of `POST /api/extract`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `POST /api/scan`
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    /// Base64 image, optionally with a `data:` URL header
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_author")]
    pub author: String,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            image: None,
            author: default_author(),
        }
    }
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

/// `{"success": true, "recipe": ...}` or `{"success": false, "error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(recipe: T) -> Self {
        Self {
            success: true,
            recipe: Some(recipe),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            recipe: None,
            error: Some(message.into()),
        }
    }

    /// HTTP status to send with the envelope: 200 on success, 400 otherwise.
    pub fn status_code(&self) -> u16 {
        if self.success {
            200
        } else {
            400
        }
    }
}

/// Drop a data URL header: everything up to and including the first `base64,`.
pub fn strip_data_url_prefix(image: &str) -> &str {
    match image.split_once("base64,") {
        Some((_, data)) => data,
        None => image,
    }
}

/// Extract a recipe page into a response envelope.
pub async fn handle_extract(
    request: ExtractRequest,
    config: &AppConfig,
) -> ApiResponse<RecipeRecord> {
    let url = match request.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => return ApiResponse::err("No URL provided"),
    };

    match pipelines::url::process(url, &config.fetch).await {
        Ok(record) => ApiResponse::ok(record),
        Err(e) => {
            warn!("Extraction failed for {}: {}", url, e);
            ApiResponse::err(e.user_message())
        }
    }
}

/// Scan a recipe photo into a response envelope.
pub async fn handle_scan(request: ScanRequest, config: &AppConfig) -> ApiResponse<VisionRecipe> {
    let data = request
        .image
        .as_deref()
        .map(|image| strip_data_url_prefix(image).trim())
        .unwrap_or_default();
    if data.is_empty() {
        return ApiResponse::err("No image data provided");
    }

    let image = ImageSource::Base64(data.to_string());
    match pipelines::image::process(&image, &request.author, &config.vision).await {
        Ok(recipe) => ApiResponse::ok(recipe),
        Err(e) => {
            warn!("Scan failed for {}: {}", request.author, e);
            ApiResponse::err(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

/// Payload of `GET /health`
pub fn health() -> HealthStatus {
    HealthStatus {
        status: "healthy".into(),
        message: "Recipe API is running".into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

/// Payload of `GET /`
pub fn service_info() -> ServiceInfo {
    let endpoints = [
        ("/api/extract", "POST - Extract recipe from URL"),
        ("/api/scan", "POST - Scan recipe from image"),
        ("/health", "GET - Health check"),
    ]
    .into_iter()
    .map(|(path, description)| (path.to_string(), description.to_string()))
    .collect();

    ServiceInfo {
        message: "Recipe Cookbook API".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        endpoints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,iVBORw0K"), "iVBORw0K");
        assert_eq!(strip_data_url_prefix("iVBORw0K"), "iVBORw0K");
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,"), "");
    }

    #[test]
    fn test_envelope_shapes() {
        let ok = serde_json::to_value(ApiResponse::ok(json!({"title": "Soup"}))).unwrap();
        assert_eq!(ok, json!({"success": true, "recipe": {"title": "Soup"}}));

        let err = ApiResponse::<RecipeRecord>::err("No URL provided");
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            serde_json::to_value(err).unwrap(),
            json!({"success": false, "error": "No URL provided"})
        );
    }

    #[test]
    fn test_scan_request_defaults_author() {
        let request: ScanRequest = serde_json::from_str(r#"{"image": "abc"}"#).unwrap();
        assert_eq!(request.author, "Unknown");
        assert_eq!(request.image.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_missing_inputs() {
        let config = AppConfig::default();

        let extract = handle_extract(ExtractRequest { url: None }, &config).await;
        assert_eq!(extract.error.as_deref(), Some("No URL provided"));

        let blank = handle_extract(
            ExtractRequest {
                url: Some("  ".to_string()),
            },
            &config,
        )
        .await;
        assert_eq!(blank.error.as_deref(), Some("No URL provided"));

        let scan = handle_scan(ScanRequest::default(), &config).await;
        assert_eq!(scan.error.as_deref(), Some("No image data provided"));

        let header_only = handle_scan(
            ScanRequest {
                image: Some("data:image/png;base64,".to_string()),
                ..ScanRequest::default()
            },
            &config,
        )
        .await;
        assert!(!header_only.success);
        assert_eq!(header_only.error.as_deref(), Some("No image data provided"));
    }

    #[test]
    fn test_probes() {
        assert_eq!(
            serde_json::to_value(health()).unwrap(),
            json!({"status": "healthy", "message": "Recipe API is running"})
        );

        let info = service_info();
        assert_eq!(info.endpoints.len(), 3);
        assert!(info.endpoints["/api/scan"].starts_with("POST"));
    }
}
