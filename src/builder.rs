use std::time::Duration;

use crate::config::{load_config, AppConfig};
use crate::error::ImportError;
use crate::images_to_text::ImageSource;
use crate::model::{RecipeRecord, VisionRecipe};
use crate::pipelines;

/// Author credited to scanned recipes when none is given
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch and extract a recipe web page
    Url(String),
    /// Scan a recipe photo
    Image(ImageSource),
}

/// Result of a recipe import operation
#[derive(Debug, Clone, PartialEq)]
pub enum ImportResult {
    /// Recipe extracted from a web page
    Page(RecipeRecord),
    /// Recipe read from a photo
    Scan(VisionRecipe),
}

impl ImportResult {
    pub fn into_page(self) -> Option<RecipeRecord> {
        match self {
            ImportResult::Page(record) => Some(record),
            ImportResult::Scan(_) => None,
        }
    }

    pub fn into_scan(self) -> Option<VisionRecipe> {
        match self {
            ImportResult::Scan(recipe) => Some(recipe),
            ImportResult::Page(_) => None,
        }
    }
}

/// Builder for configuring and executing recipe imports
#[derive(Debug, Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    conflicting_source: bool,
    author: Option<String>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    config: Option<AppConfig>,
}

impl RecipeImporterBuilder {
    fn set_source(mut self, source: InputSource) -> Self {
        if self.source.is_some() {
            self.conflicting_source = true;
        }
        self.source = Some(source);
        self
    }

    /// Set the input source to a URL
    ///
    /// # Example
    /// ```
    /// use recipe_extractor::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(self, url: impl Into<String>) -> Self {
        self.set_source(InputSource::Url(url.into()))
    }

    /// Set the input source to base64 image data
    ///
    /// A leading data URL header (`data:image/png;base64,`) is removed.
    pub fn image_base64(self, data: impl Into<String>) -> Self {
        let data = data.into();
        let data = crate::api::strip_data_url_prefix(&data).to_string();
        self.set_source(InputSource::Image(ImageSource::Base64(data)))
    }

    /// Set the input source to an image file
    ///
    /// # Example
    /// ```
    /// use recipe_extractor::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .image_path("/path/to/recipe-card.jpg")
    ///     .author("Grandma");
    /// ```
    pub fn image_path(self, path: impl Into<String>) -> Self {
        self.set_source(InputSource::Image(ImageSource::Path(path.into())))
    }

    /// Set the name credited as `source` on scanned recipes
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set a timeout for page requests
    ///
    /// # Example
    /// ```
    /// use recipe_extractor::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the vision model
    ///
    /// This allows passing the key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the vision model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Use this configuration instead of loading `config.toml` and `RECIPE__*`
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// The configuration `build` runs with: the explicit or loaded config
    /// with the builder's timeout, key and model applied on top.
    fn resolved_config(&self) -> Result<AppConfig, ImportError> {
        let mut config = match &self.config {
            Some(config) => config.clone(),
            None => load_config()?,
        };
        if let Some(timeout) = self.timeout {
            config.fetch.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        }
        if let Some(key) = &self.api_key {
            config.vision.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            config.vision.model = model.clone();
        }
        Ok(config)
    }

    /// Build and execute the recipe import
    ///
    /// # Example
    /// ```no_run
    /// use recipe_extractor::{ImportResult, RecipeImporter};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .build()
    ///     .await?;
    ///
    /// if let ImportResult::Page(recipe) = result {
    ///     println!("{}", recipe.title);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<ImportResult, ImportError> {
        if self.conflicting_source {
            return Err(ImportError::BuilderError(
                "Multiple input sources specified. Use only one of .url(), .image_base64() or .image_path()"
                    .to_string(),
            ));
        }
        let config = self.resolved_config()?;
        let source = self.source.ok_or_else(|| {
            ImportError::BuilderError(
                "No input source specified. Use .url(), .image_base64() or .image_path()"
                    .to_string(),
            )
        })?;

        match source {
            InputSource::Url(url) => {
                if url.trim().is_empty() {
                    return Err(ImportError::BuilderError("URL cannot be empty".to_string()));
                }
                let record = pipelines::url::process(url.trim(), &config.fetch).await?;
                Ok(ImportResult::Page(record))
            }
            InputSource::Image(image) => {
                if matches!(&image, ImageSource::Base64(data) if data.trim().is_empty()) {
                    return Err(ImportError::BuilderError(
                        "Image data cannot be empty".to_string(),
                    ));
                }
                let author = self.author.as_deref().unwrap_or(DEFAULT_AUTHOR);
                let recipe = pipelines::image::process(&image, author, &config.vision).await?;
                Ok(ImportResult::Scan(recipe))
            }
        }
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_extractor::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VisionError;

    #[test]
    fn test_overrides_keep_sub_second_timeout() {
        let config = RecipeImporter::builder()
            .timeout(Duration::from_millis(1500))
            .api_key("key")
            .model("claude-test")
            .config(AppConfig::default())
            .resolved_config()
            .unwrap();
        assert_eq!(config.fetch.timeout(), Duration::from_millis(1500));
        assert_eq!(config.vision.api_key.as_deref(), Some("key"));
        assert_eq!(config.vision.model, "claude-test");
    }

    #[tokio::test]
    async fn test_missing_source() {
        let result = RecipeImporter::builder()
            .config(AppConfig::default())
            .build()
            .await;
        assert!(matches!(result, Err(ImportError::BuilderError(_))));
    }

    #[tokio::test]
    async fn test_conflicting_sources() {
        let result = RecipeImporter::builder()
            .url("https://example.com/recipe")
            .image_path("/tmp/card.jpg")
            .config(AppConfig::default())
            .build()
            .await;
        match result {
            Err(ImportError::BuilderError(msg)) => assert!(msg.contains("Multiple")),
            other => panic!("expected builder error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_inputs_are_rejected() {
        let url = RecipeImporter::builder()
            .url("   ")
            .config(AppConfig::default())
            .build()
            .await;
        assert!(matches!(url, Err(ImportError::BuilderError(_))));

        let image = RecipeImporter::builder()
            .image_base64("data:image/png;base64,")
            .config(AppConfig::default())
            .build()
            .await;
        assert!(matches!(image, Err(ImportError::BuilderError(_))));
    }

    #[tokio::test]
    async fn test_missing_image_file() {
        let result = RecipeImporter::builder()
            .image_path("/definitely/not/here.png")
            .api_key("test-key")
            .config(AppConfig::default())
            .build()
            .await;
        assert!(matches!(
            result,
            Err(ImportError::Vision(VisionError::ImageRead { .. }))
        ));
    }
}
