use crate::error::ExtractionError;
use crate::model::RecipeRecord;
use log::info;

/// Accept a page record only when it carries real ingredients and instructions.
///
/// Placeholder lists produced by the extractor count as missing.
pub fn validate(record: RecipeRecord) -> Result<RecipeRecord, ExtractionError> {
    if record.has_ingredients() && record.has_instructions() {
        Ok(record)
    } else {
        info!(
            "Rejecting incomplete recipe from {} (ingredients: {}, instructions: {})",
            record.url.as_deref().unwrap_or("<unknown>"),
            record.has_ingredients(),
            record.has_instructions()
        );
        Err(ExtractionError::Incomplete)
    }
}
