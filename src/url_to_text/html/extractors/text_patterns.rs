//! Last-resort patterns over the page's visible text.

use super::{ParsingContext, TimeKind};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

// "15 min", "1 hour 30 minutes", "2 hrs"
const DURATION: &str = r"\d+\s*(?:hours?|hrs?)(?:\s*(?:and\s*)?\d+\s*(?:minutes?|mins?))?|\d+\s*(?:minutes?|mins?)";

static PREP_TIME_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)prep(?:aration)?\s*time[:\s]*({DURATION})")).unwrap()
});
static COOK_TIME_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)cook(?:ing)?\s*time[:\s]*({DURATION})")).unwrap()
});
static TOTAL_TIME_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)total\s*time[:\s]*({DURATION})")).unwrap());
static SERVINGS_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:servings?|yield|serves)[:\s]*(\d+(?:\s*-\s*\d+)?)").unwrap()
});

/// Text a reader would see: script, style and template contents are skipped.
pub fn visible_text(document: &Html) -> String {
    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent()?.value().as_element()?;
            match parent.name() {
                "script" | "style" | "noscript" | "template" => None,
                _ => Some(&**text),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capture(text: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
}

pub fn time(context: &ParsingContext, kind: TimeKind) -> Option<String> {
    let pattern = match kind {
        TimeKind::Prep => &*PREP_TIME_TEXT,
        TimeKind::Cook => &*COOK_TIME_TEXT,
        TimeKind::Total => &*TOTAL_TIME_TEXT,
    };
    capture(&visible_text(&context.document), pattern)
}

pub fn servings(context: &ParsingContext) -> Option<String> {
    capture(&visible_text(&context.document), &SERVINGS_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(body: &str) -> ParsingContext {
        let html = format!("<html><body>{body}</body></html>");
        ParsingContext::new("https://example.com/", Html::parse_document(&html))
    }

    #[test]
    fn test_times_from_text() {
        let ctx = context(
            "<p>Prep Time: 15 min</p><p>Cooking time <b>1 hour 30 minutes</b></p><p>Total time: 2 hrs</p>",
        );
        assert_eq!(time(&ctx, TimeKind::Prep).as_deref(), Some("15 min"));
        assert_eq!(
            time(&ctx, TimeKind::Cook).as_deref(),
            Some("1 hour 30 minutes")
        );
        assert_eq!(time(&ctx, TimeKind::Total).as_deref(), Some("2 hrs"));
    }

    #[test]
    fn test_servings_from_text() {
        assert_eq!(
            servings(&context("<p>Serves: 4-6 people</p>")).as_deref(),
            Some("4-6")
        );
        assert_eq!(
            servings(&context("<p>Yield 12 muffins</p>")).as_deref(),
            Some("12")
        );
        assert_eq!(servings(&context("<p>Enjoy!</p>")), None);
    }

    #[test]
    fn test_script_text_is_not_visible() {
        let ctx = context(
            r#"<script>var config = "prep time: 99 min";</script><style>.x{}</style><p>Prep time: 10 minutes</p>"#,
        );
        assert_eq!(time(&ctx, TimeKind::Prep).as_deref(), Some("10 minutes"));
        assert!(!visible_text(&ctx.document).contains("var config"));
    }
}
