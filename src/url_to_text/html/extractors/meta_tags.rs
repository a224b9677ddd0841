//! Page-level `<meta>` tags: Open Graph and the standard description.

use super::ParsingContext;
use scraper::{Html, Selector};

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

pub fn og_title(context: &ParsingContext) -> Option<String> {
    meta_content(
        &context.document,
        r#"meta[property="og:title"], meta[name="og:title"]"#,
    )
}

pub fn description(context: &ParsingContext) -> Option<String> {
    meta_content(&context.document, r#"meta[name="description"]"#)
}

pub fn og_description(context: &ParsingContext) -> Option<String> {
    meta_content(
        &context.document,
        r#"meta[property="og:description"], meta[name="og:description"]"#,
    )
}

pub fn og_image(context: &ParsingContext) -> Option<String> {
    meta_content(
        &context.document,
        r#"meta[property="og:image"], meta[name="og:image"]"#,
    )
    .map(|image| context.resolve_url(&image))
}
