use once_cell::sync::Lazy;
use regex::Regex;

static HOURS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)H").unwrap());
static MINUTES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)M").unwrap());

/// Convert an ISO 8601 style duration into a short readable form.
///
/// `PT1H30M` becomes `1 hr 30 min`, `PT45M` becomes `45 min`. Hours and
/// minutes are read independently, so values are not rebalanced
/// (`PT90M` stays `90 min`). Returns `None` when neither component is present.
pub fn normalize(duration: &str) -> Option<String> {
    let hours = HOURS_RE.captures(duration).map(|c| c[1].to_string());
    let minutes = MINUTES_RE.captures(duration).map(|c| c[1].to_string());

    let parts: Vec<String> = [
        hours.map(|h| format!("{h} hr")),
        minutes.map(|m| format!("{m} min")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
