//! The i18n reference table: locale → variable name → display text.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
    Serializer,
};
use thiserror::Error;

use super::variable::normalize;
use crate::input::TranslationUnit;
use crate::types::{
    Locale,
    LocaleSet,
};

/// Locale id, e.g. `es`.
pub const LOCALE_ID: &str = "localeId";
/// URL slug: empty for the primary locale, the id otherwise.
pub const LOCALE_CODE: &str = "localeCode";
/// Code of the locale the language switcher points at.
pub const LOCALE_CUE_CODE: &str = "localeCueCode";
/// Label of the locale the language switcher points at.
pub const LOCALE_CUE: &str = "localeCue";
pub const CURRENT_YEAR: &str = "currentYear";

/// Variable names stamped into every locale and unavailable to translations.
pub const RESERVED_NAMES: [&str; 5] =
    [LOCALE_ID, LOCALE_CODE, LOCALE_CUE_CODE, LOCALE_CUE, CURRENT_YEAR];

/// What to do when two translations normalize to the same variable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort the run.
    #[default]
    Error,
    /// Keep the last value and log a warning.
    Overwrite,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error(
        "\"{second}\" and \"{first}\" both map to the variable name `{name}`; rename one of them or set \"onCollision\": \"overwrite\""
    )]
    Collision { name: String, first: String, second: String },
}

/// Variables visible to one locale's templates.
///
/// A name mapped to `None` is declared but untranslated: it renders as an
/// empty string and is left out of the serialized reference file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleVariables {
    values: IndexMap<String, Option<String>>,
}

impl LocaleVariables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.values.insert(name.into(), value);
    }

    /// `None` if the name is undefined, `Some(None)` if defined without a value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.values.get(name).map(Option::as_deref)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), Some(v.into()))).collect() }
    }
}

impl Serialize for LocaleVariables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.values.iter().filter_map(|(name, value)| value.as_ref().map(|v| (name, v))),
        )
    }
}

/// Complete locale → variable → value mapping, in declared locale order.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceTable {
    locales: IndexMap<String, LocaleVariables>,
}

impl ReferenceTable {
    #[must_use]
    pub fn locale(&self, id: &str) -> Option<&LocaleVariables> {
        self.locales.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleVariables)> {
        self.locales.iter().map(|(id, variables)| (id.as_str(), variables))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

/// Builds a [`ReferenceTable`] from translation units.
#[derive(Debug, Clone)]
pub struct ReferenceBuilder<'a> {
    locales: &'a LocaleSet,
    current_year: String,
    on_collision: CollisionPolicy,
}

impl<'a> ReferenceBuilder<'a> {
    #[must_use]
    pub fn new(locales: &'a LocaleSet) -> Self {
        Self {
            locales,
            current_year: chrono::Local::now().format("%Y").to_string(),
            on_collision: CollisionPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_current_year(mut self, year: impl Into<String>) -> Self {
        self.current_year = year.into();
        self
    }

    #[must_use]
    pub const fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.on_collision = policy;
        self
    }

    /// Builds the table.
    ///
    /// The primary locale gets the unit's own text unless the unit carries a
    /// primary-locale variant; other locales get their variant or `None`.
    pub fn build(&self, units: &[TranslationUnit]) -> Result<ReferenceTable, ReferenceError> {
        let mut table = ReferenceTable::default();
        for locale in self.locales {
            table.locales.insert(locale.id.clone(), self.metadata(locale));
        }

        // variable name -> unit id that produced it
        let mut origins: HashMap<String, String> = RESERVED_NAMES
            .iter()
            .map(|name| ((*name).to_string(), "<locale metadata>".to_string()))
            .collect();

        for unit in units {
            let name = normalize(&unit.id);
            if name.is_empty() {
                tracing::warn!(
                    "\"{}\" does not contain any letters or digits to build a variable name from; skipping",
                    unit.id
                );
                continue;
            }

            if let Some(first) = origins.insert(name.clone(), unit.id.clone()) {
                match self.on_collision {
                    CollisionPolicy::Error => {
                        return Err(ReferenceError::Collision {
                            name,
                            first,
                            second: unit.id.clone(),
                        });
                    }
                    CollisionPolicy::Overwrite => {
                        tracing::warn!(
                            "\"{}\" overwrites \"{}\" as variable `{}`",
                            unit.id,
                            first,
                            name
                        );
                    }
                }
            }

            for locale in self.locales {
                let value = if self.locales.is_primary(locale) {
                    Some(unit.variant(&locale.id).unwrap_or(&unit.id).to_string())
                } else {
                    unit.variant(&locale.id).map(str::to_string)
                };
                if let Some(variables) = table.locales.get_mut(&locale.id) {
                    variables.insert(name.clone(), value);
                }
            }
        }

        Ok(table)
    }

    fn metadata(&self, locale: &Locale) -> LocaleVariables {
        let paired = self.locales.paired(locale);
        let code = if self.locales.is_primary(locale) { String::new() } else { locale.id.clone() };

        let mut variables = LocaleVariables::new();
        variables.insert(LOCALE_ID, Some(locale.id.clone()));
        variables.insert(LOCALE_CODE, Some(code));
        variables.insert(LOCALE_CUE_CODE, Some(paired.cue_code().to_string()));
        variables.insert(LOCALE_CUE, Some(paired.cue().to_string()));
        variables.insert(CURRENT_YEAR, Some(self.current_year.clone()));
        variables
    }
}
