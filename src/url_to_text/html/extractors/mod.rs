use scraper::Html;

pub mod html_class;
pub mod json_ld;
pub mod meta_tags;
pub mod text_patterns;

pub use json_ld::EmbeddedRecipe;

/// Everything a field strategy may look at.
///
/// The embedded JSON-LD recipe is parsed once when the context is built and
/// shared by every field.
pub struct ParsingContext {
    pub url: String,
    pub document: Html,
    pub metadata: Option<EmbeddedRecipe>,
}

impl ParsingContext {
    pub fn new(url: &str, document: Html) -> Self {
        let metadata = json_ld::parse(&document);
        Self {
            url: url.to_string(),
            document,
            metadata,
        }
    }

    /// Make a link found on the page absolute; unresolvable links are kept as written.
    pub fn resolve_url(&self, link: &str) -> String {
        reqwest::Url::parse(&self.url)
            .and_then(|base| base.join(link))
            .map(String::from)
            .unwrap_or_else(|_| link.to_string())
    }
}

/// A single way of recovering one field. `None` hands over to the next strategy.
pub type Strategy<T> = fn(&ParsingContext) -> Option<T>;

/// Which of the three recipe durations a strategy is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeKind {
    Prep,
    Cook,
    Total,
}

pub type TimeStrategy = fn(&ParsingContext, TimeKind) -> Option<String>;

/// Run named strategies in order and return the first value found.
pub fn first_match<T>(
    context: &ParsingContext,
    field: &str,
    strategies: &[(&str, Strategy<T>)],
) -> Option<T> {
    strategies.iter().find_map(|(name, strategy)| {
        let value = strategy(context);
        if value.is_some() {
            log::debug!("Found {} using {}", field, name);
        }
        value
    })
}

/// Drop blank entries and repeated entries, keeping first-seen order.
pub fn dedupe(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for item in items {
        if !item.is_empty() && !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

/// `None` for an empty list so the cascade moves on.
pub(crate) fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
