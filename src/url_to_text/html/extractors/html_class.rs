use super::{dedupe, non_empty, ParsingContext, TimeKind};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static PREP_TIME_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)prep[-_]?time").unwrap());
static COOK_TIME_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)cook[-_]?time").unwrap());
static TOTAL_TIME_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)total[-_]?time").unwrap());
static SERVINGS_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)servings?|yield").unwrap());
static INGREDIENT_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)ingredient").unwrap());
static INSTRUCTION_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)instruction|direction|step|method").unwrap());

/// Ingredient list items must be longer than this many characters
const MIN_INGREDIENT_CHARS: usize = 2;
/// Instruction list items must be longer than this many characters
const MIN_INSTRUCTION_CHARS: usize = 5;

/// Elements carrying at least one class matching `pattern`, in document order.
fn elements_with_class<'a>(
    document: &'a Html,
    pattern: &'a Regex,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let selector = Selector::parse("[class]").unwrap();
    document
        .select(&selector)
        .filter(move |element| element.value().classes().any(|class| pattern.is_match(class)))
        .collect::<Vec<_>>()
        .into_iter()
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_class_text(document: &Html, pattern: &Regex) -> Option<String> {
    elements_with_class(document, pattern)
        .map(|element| element_text(&element))
        .find(|text| !text.is_empty())
}

/// Collect `<li>` texts inside every container whose class matches.
fn list_items(document: &Html, pattern: &Regex, min_chars: usize) -> Vec<String> {
    let li = Selector::parse("li").unwrap();
    let items = elements_with_class(document, pattern).flat_map(|container| {
        container
            .select(&li)
            .map(|item| element_text(&item))
            .filter(|text| text.chars().count() > min_chars)
            .collect::<Vec<_>>()
    });
    dedupe(items)
}

pub fn first_heading(context: &ParsingContext) -> Option<String> {
    let selector = Selector::parse("h1").unwrap();
    let heading = context.document.select(&selector).next()?;
    Some(element_text(&heading)).filter(|text| !text.is_empty())
}

pub fn document_title(context: &ParsingContext) -> Option<String> {
    let selector = Selector::parse("title").unwrap();
    let title = context.document.select(&selector).next()?;
    Some(element_text(&title)).filter(|text| !text.is_empty())
}

pub fn time(context: &ParsingContext, kind: TimeKind) -> Option<String> {
    let pattern = match kind {
        TimeKind::Prep => &*PREP_TIME_CLASS,
        TimeKind::Cook => &*COOK_TIME_CLASS,
        TimeKind::Total => &*TOTAL_TIME_CLASS,
    };
    first_class_text(&context.document, pattern)
}

pub fn servings(context: &ParsingContext) -> Option<String> {
    first_class_text(&context.document, &SERVINGS_CLASS)
}

pub fn ingredient_list(context: &ParsingContext) -> Option<Vec<String>> {
    let items = list_items(&context.document, &INGREDIENT_CLASS, MIN_INGREDIENT_CHARS);
    debug!("Found {} ingredient list items by class", items.len());
    non_empty(items)
}

pub fn instruction_list(context: &ParsingContext) -> Option<Vec<String>> {
    let items = list_items(
        &context.document,
        &INSTRUCTION_CLASS,
        MIN_INSTRUCTION_CHARS,
    );
    debug!("Found {} instruction list items by class", items.len());
    non_empty(items)
}

/// First `<img>` whose source looks like a food or recipe photo.
pub fn food_image(context: &ParsingContext) -> Option<String> {
    let selector = Selector::parse("img[src]").unwrap();
    context
        .document
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .find(|src| {
            let src = src.to_lowercase();
            src.contains("recipe") || src.contains("food")
        })
        .map(|src| context.resolve_url(src))
}
