//! Translation units and the JSON dictionary reader.

use indexmap::IndexMap;
use serde_json::Value;

use super::SourceError;

/// One translatable phrase and its per-locale variants.
///
/// `id` is the dictionary key (JSON) or the unit identifier (TMX); it is
/// both the input to variable-name normalization and the primary-locale
/// fallback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    pub id: String,
    /// Locale id → translated text, in source order.
    pub variants: IndexMap<String, String>,
}

impl TranslationUnit {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), variants: IndexMap::new() }
    }

    #[must_use]
    pub fn with_variant(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.variants.insert(locale.into(), text.into());
        self
    }

    #[must_use]
    pub fn variant(&self, locale: &str) -> Option<&str> {
        self.variants.get(locale).map(String::as_str)
    }
}

/// Parses a `{ "<phrase>": { "<locale>": "<text>", ... }, ... }` dictionary.
///
/// Entries with an empty key or a `null` value are skipped; entries whose
/// value is not an object are skipped with a warning. Source order is kept.
///
/// # Examples
/// ```
/// use locale_html::input::translation::parse_dictionary;
///
/// let units = parse_dictionary(r#"{"Welcome": {"es": "Bienvenido"}}"#).unwrap();
/// assert_eq!(units[0].id, "Welcome");
/// assert_eq!(units[0].variant("es"), Some("Bienvenido"));
/// ```
pub fn parse_dictionary(text: &str) -> Result<Vec<TranslationUnit>, SourceError> {
    let json: Value = serde_json::from_str(text)?;
    let entries = match json {
        Value::Object(entries) => entries,
        other => return Err(SourceError::UnexpectedRoot(json_kind(&other))),
    };

    let mut units = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        if key.is_empty() {
            tracing::debug!("Skipping dictionary entry with an empty key");
            continue;
        }

        match value {
            Value::Object(translations) => {
                let mut unit = TranslationUnit::new(key);
                for (locale, text) in translations {
                    if let Some(text) = variant_text(text) {
                        unit.variants.insert(locale, text);
                    }
                }
                units.push(unit);
            }
            Value::Null => {
                tracing::debug!(key = %key, "Skipping dictionary entry without translations");
            }
            other => {
                tracing::warn!(
                    "Dictionary entry \"{}\" must map to an object of translations, found {}; skipping",
                    key,
                    json_kind(&other)
                );
            }
        }
    }

    Ok(units)
}

fn variant_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
