use crate::config::FetchConfig;
use crate::error::ImportError;
use crate::model::RecipeRecord;
use crate::url_to_text::fetchers::RequestFetcher;
use crate::url_to_text::html::extract_from_html;
use crate::validate::validate;
use log::info;

/// Process a URL to extract a recipe
///
/// This pipeline:
/// 1. Fetches HTML using RequestFetcher
/// 2. Runs the per-field extraction cascade over the page
/// 3. Rejects records without real ingredients and instructions
pub async fn process(url: &str, config: &FetchConfig) -> Result<RecipeRecord, ImportError> {
    let fetcher = RequestFetcher::new(config)?;
    let html = fetcher.fetch(url).await?;

    let record = validate(extract_from_html(&html, url))?;
    info!(
        "Extracted \"{}\" from {} ({} ingredients, {} steps)",
        record.title,
        url,
        record.ingredients.len(),
        record.instructions.len()
    );
    Ok(record)
}
