use crate::error::VisionError;
use crate::model::VisionRecipe;
use log::debug;

/// Remove a surrounding Markdown code fence (```` ```json ```` or ```` ``` ````).
pub fn strip_code_fence(reply: &str) -> &str {
    let mut body = reply.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parse the model's reply and attach the caller's attribution as `source`.
pub fn parse_recipe_response(reply: &str, source: &str) -> Result<VisionRecipe, VisionError> {
    let mut recipe: VisionRecipe = serde_json::from_str(strip_code_fence(reply)).map_err(|e| {
        debug!("Unparseable model reply: {}", reply);
        VisionError::MalformedResponse(e.to_string())
    })?;
    recipe.source = source.to_string();
    Ok(recipe)
}
