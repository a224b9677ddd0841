pub mod api;
pub mod builder;
pub mod config;
pub mod duration;
pub mod error;
pub mod images_to_text;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod url_to_text;
pub mod validate;

// Re-export commonly used types
pub use builder::{ImportResult, RecipeImporter, RecipeImporterBuilder, DEFAULT_AUTHOR};
pub use config::{load_config, AppConfig, FetchConfig, VisionConfig};
pub use error::{ExtractionError, FetchError, ImportError, VisionError};
pub use images_to_text::ImageSource;
pub use model::{RecipeRecord, Section, VisionRecipe};

/// Fetch a recipe page and extract a validated recipe from it.
///
/// Settings come from `config.toml` and `RECIPE__*` variables.
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), recipe_extractor::ImportError> {
/// let recipe = recipe_extractor::fetch_recipe("https://example.com/recipe").await?;
/// println!("{} ({} ingredients)", recipe.title, recipe.ingredients.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_recipe(url: &str) -> Result<RecipeRecord, ImportError> {
    let config = load_config()?;
    pipelines::url::process(url, &config.fetch).await
}

/// Read a recipe from base64 image data and credit it to `author`.
///
/// Requires `ANTHROPIC_API_KEY` or a configured `vision.api_key`.
pub async fn scan_recipe(image_base64: &str, author: &str) -> Result<VisionRecipe, ImportError> {
    let config = load_config()?;
    let image = ImageSource::Base64(api::strip_data_url_prefix(image_base64).to_string());
    Ok(pipelines::image::process(&image, author, &config.vision).await?)
}
