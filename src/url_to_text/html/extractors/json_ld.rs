use super::{dedupe, non_empty, ParsingContext, TimeKind};
use crate::duration;
use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;

/// The recipe described by the page's embedded schema.org JSON-LD block.
///
/// Every property is read independently, so one malformed property never
/// hides the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedRecipe {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Raw ISO 8601 durations, normalized when a field asks for them
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub total_time: Option<String>,
    pub recipe_yield: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image: Option<String>,
}

/// Parse the first `application/ld+json` block of the document.
///
/// Returns `None` when there is no block, it is not valid JSON, or it does
/// not describe a `Recipe`. Only the first block is considered; a top-level
/// array contributes its first element.
pub fn parse(document: &Html) -> Option<EmbeddedRecipe> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let script = document.select(&selector).next()?;
    let raw_json = script.text().collect::<String>();

    let json_ld: Value = match serde_json::from_str(raw_json.trim()) {
        Ok(value) => value,
        Err(e) => {
            debug!("JsonLd: failed to parse embedded metadata: {}", e);
            return None;
        }
    };

    let recipe = match json_ld {
        Value::Array(items) => items.into_iter().next()?,
        other => other,
    };

    if !is_recipe_type(&recipe) {
        debug!("JsonLd: first block is not a Recipe");
        return None;
    }

    Some(EmbeddedRecipe {
        name: string_prop(&recipe, "name"),
        description: description(&recipe),
        prep_time: string_prop(&recipe, "prepTime"),
        cook_time: string_prop(&recipe, "cookTime"),
        total_time: string_prop(&recipe, "totalTime"),
        recipe_yield: recipe.get("recipeYield").and_then(yield_text),
        ingredients: ingredients(&recipe),
        instructions: recipe
            .get("recipeInstructions")
            .map(instructions)
            .unwrap_or_default(),
        image: recipe.get("image").and_then(image_url),
    })
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn string_prop(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).and_then(clean)
}

/// Decode entities and trim; blank strings count as absent.
fn clean(text: &str) -> Option<String> {
    let decoded = decode_html_symbols(text);
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn decode_html_symbols(text: &str) -> String {
    // some sites encode twice
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn description(recipe: &Value) -> Option<String> {
    match recipe.get("description")? {
        Value::String(text) => clean(text),
        Value::Object(_) => string_prop(recipe.get("description")?, "text"),
        _ => None,
    }
}

fn yield_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => clean(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.first().and_then(yield_text),
        _ => None,
    }
}

fn ingredients(recipe: &Value) -> Vec<String> {
    recipe
        .get("recipeIngredient")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(clean)
                .collect()
        })
        .unwrap_or_default()
}

/// Flatten `recipeInstructions` into step texts.
///
/// Accepts a single string, a list of strings, a list of `HowToStep`
/// objects, and `HowToSection` objects wrapping steps in `itemListElement`.
fn instructions(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => clean(text).into_iter().collect(),
        Value::Array(steps) => steps.iter().flat_map(instructions).collect(),
        Value::Object(step) => {
            if let Some(items) = step.get("itemListElement") {
                return instructions(items);
            }
            step.get("text")
                .or_else(|| step.get("name"))
                .and_then(Value::as_str)
                .and_then(clean)
                .into_iter()
                .collect()
        }
        _ => Vec::new(),
    }
}

fn image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(url) => clean(url),
        Value::Array(images) => images.first().and_then(image_url),
        Value::Object(_) => string_prop(value, "url"),
        _ => None,
    }
}

// Field strategies

pub fn title(context: &ParsingContext) -> Option<String> {
    context.metadata.as_ref()?.name.clone()
}

pub fn description_text(context: &ParsingContext) -> Option<String> {
    context.metadata.as_ref()?.description.clone()
}

pub fn time(context: &ParsingContext, kind: TimeKind) -> Option<String> {
    let metadata = context.metadata.as_ref()?;
    let raw = match kind {
        TimeKind::Prep => metadata.prep_time.as_deref(),
        TimeKind::Cook => metadata.cook_time.as_deref(),
        TimeKind::Total => metadata.total_time.as_deref(),
    }?;
    duration::normalize(raw)
}

pub fn servings(context: &ParsingContext) -> Option<String> {
    context.metadata.as_ref()?.recipe_yield.clone()
}

pub fn ingredient_list(context: &ParsingContext) -> Option<Vec<String>> {
    let metadata = context.metadata.as_ref()?;
    non_empty(dedupe(metadata.ingredients.iter().cloned()))
}

pub fn instruction_list(context: &ParsingContext) -> Option<Vec<String>> {
    let metadata = context.metadata.as_ref()?;
    non_empty(dedupe(metadata.instructions.iter().cloned()))
}

pub fn image(context: &ParsingContext) -> Option<String> {
    context.metadata.as_ref()?.image.clone()
}
