use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder list used when no ingredients could be found on a page.
pub const INGREDIENTS_NOT_FOUND: &str = "Ingredients not found";
/// Placeholder list used when no instructions could be found on a page.
pub const INSTRUCTIONS_NOT_FOUND: &str = "Instructions not found";

/// A recipe recovered from a web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub url: Option<String>,
    /// Site label derived from the URL host, e.g. "Example" for www.example.com
    pub source: String,
    pub title: String,
    pub description: String,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub total_time: Option<String>,
    pub servings: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image_url: Option<String>,
}

impl RecipeRecord {
    pub fn has_ingredients(&self) -> bool {
        is_usable(&self.ingredients, INGREDIENTS_NOT_FOUND)
    }

    pub fn has_instructions(&self) -> bool {
        is_usable(&self.instructions, INSTRUCTIONS_NOT_FOUND)
    }
}

fn is_usable(items: &[String], placeholder: &str) -> bool {
    !(items.is_empty() || (items.len() == 1 && items[0] == placeholder))
}

/// One part of a scanned recipe, e.g. the cake or its frosting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// `None` for the single unnamed section of a simple recipe
    #[serde(default, deserialize_with = "optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub instructions: Vec<String>,
}

/// A recipe read from a photo by the vision model.
///
/// Times and servings are kept as the model wrote them; unreadable values
/// arrive as the literal `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionRecipe {
    /// Attribution label supplied by the caller, not by the model
    #[serde(default)]
    pub source: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    pub sections: Vec<Section>,
    #[serde(default, deserialize_with = "optional_text")]
    pub prep_time: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub cook_time: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub servings: Option<String>,
}

// Model replies are loosely typed: `"servings": 4`, `"title": null`.
fn value_text<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(E::custom(format!("expected text, found {other}"))),
    }
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    value_text(Value::deserialize(deserializer)?)
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut list = Vec::with_capacity(items.len());
    for item in items {
        if let Some(text) = value_text::<D::Error>(item)? {
            list.push(text);
        }
    }
    Ok(list)
}

/// Derive the display label for a page from its URL.
///
/// `https://www.example.com/recipes/1` becomes `Example`.
pub fn source_from_url(url: &str) -> String {
    let host = reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let label = host.split('.').next().unwrap_or_default();

    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
