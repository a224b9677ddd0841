//! Structured-data extraction from a parsed recipe page.
//!
//! Every field has its own ordered cascade of strategies: embedded JSON-LD
//! first, then page meta tags, then DOM and text heuristics. A field that no
//! strategy can recover falls back to a default instead of failing the page.

pub mod extractors;

use self::extractors::{
    first_match, html_class, json_ld, meta_tags, text_patterns, ParsingContext, Strategy,
    TimeKind, TimeStrategy,
};
use crate::model::{source_from_url, RecipeRecord, INGREDIENTS_NOT_FOUND, INSTRUCTIONS_NOT_FOUND};
use log::debug;
use scraper::Html;

const TITLE: &[(&str, Strategy<String>)] = &[
    ("json_ld", json_ld::title),
    ("og:title", meta_tags::og_title),
    ("h1", html_class::first_heading),
    ("title", html_class::document_title),
];

const DESCRIPTION: &[(&str, Strategy<String>)] = &[
    ("json_ld", json_ld::description_text),
    ("meta description", meta_tags::description),
    ("og:description", meta_tags::og_description),
];

const TIME: &[(&str, TimeStrategy)] = &[
    ("json_ld", json_ld::time),
    ("class", html_class::time),
    ("text", text_patterns::time),
];

const SERVINGS: &[(&str, Strategy<String>)] = &[
    ("json_ld", json_ld::servings),
    ("class", html_class::servings),
    ("text", text_patterns::servings),
];

const INGREDIENTS: &[(&str, Strategy<Vec<String>>)] = &[
    ("json_ld", json_ld::ingredient_list),
    ("class", html_class::ingredient_list),
];

const INSTRUCTIONS: &[(&str, Strategy<Vec<String>>)] = &[
    ("json_ld", json_ld::instruction_list),
    ("class", html_class::instruction_list),
];

const IMAGE: &[(&str, Strategy<String>)] = &[
    ("json_ld", json_ld::image),
    ("og:image", meta_tags::og_image),
    ("img", html_class::food_image),
];

/// Extract a recipe record from raw page HTML. Never fails.
pub fn extract_from_html(html: &str, url: &str) -> RecipeRecord {
    extract(Html::parse_document(html), url)
}

/// Extract a recipe record from a parsed document. Never fails.
///
/// Ingredients and instructions that cannot be found become the
/// single-entry placeholder lists checked by [`crate::validate`].
pub fn extract(document: Html, url: &str) -> RecipeRecord {
    let context = ParsingContext::new(url, document);
    debug!(
        "Extracting recipe from {} (embedded metadata: {})",
        url,
        context.metadata.is_some()
    );

    RecipeRecord {
        url: Some(url.to_string()),
        source: source_from_url(url),
        title: first_match(&context, "title", TITLE).unwrap_or_else(|| "Recipe".to_string()),
        description: first_match(&context, "description", DESCRIPTION).unwrap_or_default(),
        prep_time: time(&context, TimeKind::Prep),
        cook_time: time(&context, TimeKind::Cook),
        total_time: time(&context, TimeKind::Total),
        servings: first_match(&context, "servings", SERVINGS),
        ingredients: first_match(&context, "ingredients", INGREDIENTS)
            .unwrap_or_else(|| vec![INGREDIENTS_NOT_FOUND.to_string()]),
        instructions: first_match(&context, "instructions", INSTRUCTIONS)
            .unwrap_or_else(|| vec![INSTRUCTIONS_NOT_FOUND.to_string()]),
        image_url: first_match(&context, "image", IMAGE),
    }
}

fn time(context: &ParsingContext, kind: TimeKind) -> Option<String> {
    TIME.iter().find_map(|(name, strategy)| {
        let value = strategy(context, kind);
        if value.is_some() {
            debug!("Found {:?} time using {}", kind, name);
        }
        value
    })
}
