//! Core types used throughout the project.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// A target locale for output generation.
///
/// `locale_cue` / `locale_cue_code` describe how a language switcher on
/// *another* locale's page should point at this one (e.g. "En Español" / "es").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_cue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_cue_code: Option<String>,

    #[serde(default)]
    pub is_primary: bool,
}

impl Locale {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), locale_cue: None, locale_cue_code: None, is_primary: false }
    }

    #[must_use]
    pub fn primary(id: impl Into<String>) -> Self {
        Self { is_primary: true, ..Self::new(id) }
    }

    #[must_use]
    pub fn with_cue(mut self, cue: impl Into<String>, cue_code: impl Into<String>) -> Self {
        self.locale_cue = Some(cue.into());
        self.locale_cue_code = Some(cue_code.into());
        self
    }

    /// Switcher label, falling back to the id.
    #[must_use]
    pub fn cue(&self) -> &str {
        self.locale_cue.as_deref().unwrap_or(&self.id)
    }

    /// Switcher code, falling back to the id.
    #[must_use]
    pub fn cue_code(&self) -> &str {
        self.locale_cue_code.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleSetError {
    #[error("At least one locale is required")]
    Empty,

    #[error("No primary locale is declared")]
    NoPrimary,

    #[error("Multiple primary locales are declared: {}", .0.join(", "))]
    MultiplePrimary(Vec<String>),

    #[error("Locale '{0}' is declared more than once")]
    Duplicate(String),
}

/// Ordered, non-empty sequence of locales with exactly one primary.
///
/// Iteration order is the declared order and is the order in which
/// templates are rendered and the reference table is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    primary: Locale,
    locales: Vec<Locale>,
}

impl LocaleSet {
    /// Builds a set from declared locales, checking the primary/uniqueness rules.
    pub fn new(locales: Vec<Locale>) -> Result<Self, LocaleSetError> {
        if locales.is_empty() {
            return Err(LocaleSetError::Empty);
        }

        for (index, locale) in locales.iter().enumerate() {
            if locales.iter().skip(index + 1).any(|other| other.id == locale.id) {
                return Err(LocaleSetError::Duplicate(locale.id.clone()));
            }
        }

        let primaries: Vec<&Locale> = locales.iter().filter(|l| l.is_primary).collect();
        let primary = match primaries.as_slice() {
            [] => return Err(LocaleSetError::NoPrimary),
            [primary] => (*primary).clone(),
            many => {
                return Err(LocaleSetError::MultiplePrimary(
                    many.iter().map(|l| l.id.clone()).collect(),
                ));
            }
        };

        Ok(Self { primary, locales })
    }

    /// Builds a set whose first entry is `primary`, followed by `others`.
    ///
    /// Entries repeating an earlier id are dropped and every non-first entry
    /// is demoted to non-primary.
    #[must_use]
    pub fn with_primary(primary: Locale, others: impl IntoIterator<Item = Locale>) -> Self {
        let primary = Locale { is_primary: true, ..primary };
        let mut locales = vec![primary.clone()];
        for locale in others {
            if locales.iter().any(|l| l.id == locale.id) {
                continue;
            }
            locales.push(Locale { is_primary: false, ..locale });
        }
        Self { primary, locales }
    }

    #[must_use]
    pub const fn primary(&self) -> &Locale {
        &self.primary
    }

    #[must_use]
    pub fn is_primary(&self, locale: &Locale) -> bool {
        self.primary.id == locale.id
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Locale> {
        self.locales.iter()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.locales.iter().map(|l| l.id.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Always `false`; a `LocaleSet` cannot be constructed empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// The locale a language switcher on `locale`'s pages points at: the
    /// next one in declared order, wrapping around.
    #[must_use]
    pub fn paired<'a>(&'a self, locale: &'a Locale) -> &'a Locale {
        self.locales
            .iter()
            .position(|l| l.id == locale.id)
            .and_then(|index| self.locales.get((index + 1) % self.locales.len()))
            .unwrap_or(locale)
    }
}

impl<'a> IntoIterator for &'a LocaleSet {
    type Item = &'a Locale;
    type IntoIter = std::slice::Iter<'a, Locale>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn en_es() -> Vec<Locale> {
        vec![
            Locale::primary("en").with_cue("English", "en"),
            Locale::new("es").with_cue("En Español", "es"),
        ]
    }

    #[rstest]
    fn new_accepts_single_primary() {
        let set = LocaleSet::new(en_es()).unwrap();

        assert_that!(set.primary().id, eq("en"));
        assert_eq!(set.ids(), vec!["en", "es"]);
    }

    #[rstest]
    #[case::empty(vec![], LocaleSetError::Empty)]
    #[case::no_primary(vec![Locale::new("en")], LocaleSetError::NoPrimary)]
    #[case::duplicate(
        vec![Locale::primary("en"), Locale::new("en")],
        LocaleSetError::Duplicate("en".to_string())
    )]
    #[case::two_primaries(
        vec![Locale::primary("en"), Locale::primary("es")],
        LocaleSetError::MultiplePrimary(vec!["en".to_string(), "es".to_string()])
    )]
    fn new_rejects_invalid_declarations(
        #[case] locales: Vec<Locale>,
        #[case] expected: LocaleSetError,
    ) {
        assert_that!(LocaleSet::new(locales), err(eq(&expected)));
    }

    #[rstest]
    fn with_primary_puts_primary_first_and_dedups() {
        let set = LocaleSet::with_primary(
            Locale::new("en"),
            vec![Locale::new("fr"), Locale::primary("en"), Locale::primary("fr"), Locale::new("de")],
        );

        assert_eq!(set.ids(), vec!["en", "fr", "de"]);
        assert_that!(set.iter().filter(|l| l.is_primary).count(), eq(1));
        assert_that!(set.primary().is_primary, eq(true));
    }

    #[rstest]
    fn paired_wraps_around() {
        let set = LocaleSet::new(vec![
            Locale::primary("en"),
            Locale::new("es"),
            Locale::new("fr"),
        ])
        .unwrap();

        let ids: Vec<&str> = set.iter().map(|l| set.paired(l).id.as_str()).collect();
        assert_eq!(ids, vec!["es", "fr", "en"]);
    }

    #[rstest]
    fn paired_of_single_locale_is_itself() {
        let set = LocaleSet::new(vec![Locale::primary("en")]).unwrap();

        assert_that!(set.paired(set.primary()).id, eq("en"));
    }

    #[googletest::test]
    fn cue_falls_back_to_id() {
        let bare = Locale::new("de");
        let labelled = Locale::new("es").with_cue("En Español", "es-mx");

        expect_that!(bare.cue(), eq("de"));
        expect_that!(bare.cue_code(), eq("de"));
        expect_that!(labelled.cue(), eq("En Español"));
        expect_that!(labelled.cue_code(), eq("es-mx"));
    }

    #[rstest]
    fn deserialize_locale_config() {
        let json = r#"{"id": "es", "localeCue": "En Español", "localeCueCode": "es"}"#;

        let locale: Locale = serde_json::from_str(json).unwrap();

        assert_that!(locale, eq(&Locale::new("es").with_cue("En Español", "es")));
    }
}
