use crate::config::VisionConfig;
use crate::error::VisionError;
use crate::images_to_text::{ImagePayload, ImageSource, VisionExtractor};
use crate::model::VisionRecipe;

/// Read a recipe photo and credit the result to `author`.
pub async fn process(
    image: &ImageSource,
    author: &str,
    config: &VisionConfig,
) -> Result<VisionRecipe, VisionError> {
    let payload = ImagePayload::from_source(image).await?;
    VisionExtractor::new(config.clone())
        .extract(&payload, author)
        .await
}
