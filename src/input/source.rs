//! Locale source selection and loading.

use std::path::{
    Path,
    PathBuf,
};

use super::SourceError;
use super::tmx::parse_tmx;
use super::translation::{
    TranslationUnit,
    parse_dictionary,
};
use crate::types::{
    Locale,
    LocaleSet,
};

/// Where translations come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleSource {
    /// Hand-authored `{ phrase: { locale: text } }` dictionary (`i18n` option).
    Json(PathBuf),
    /// Translation-memory exchange document (`tmx` option).
    Tmx(PathBuf),
}

/// Result of reading a locale source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    pub units: Vec<TranslationUnit>,
    /// Locales to render: the configured ones for JSON, discovered ones for TMX.
    pub locales: LocaleSet,
}

impl LocaleSource {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Json(path) | Self::Tmx(path) => path,
        }
    }

    /// Name of the configuration option this source came from.
    #[must_use]
    pub const fn option_name(&self) -> &'static str {
        match self {
            Self::Json(_) => "i18n",
            Self::Tmx(_) => "tmx",
        }
    }

    /// Reads the source file and produces its translation units and locales.
    pub fn load(&self, configured: &LocaleSet) -> Result<LoadedSource, SourceError> {
        tracing::debug!(source = %self.path().display(), "Loading locale source");
        let text = std::fs::read_to_string(self.path())?;
        self.parse(&text, configured)
    }

    /// Parses already-read source text.
    pub fn parse(&self, text: &str, configured: &LocaleSet) -> Result<LoadedSource, SourceError> {
        match self {
            Self::Json(_) => {
                let units = parse_dictionary(text)?;
                Ok(LoadedSource { units, locales: configured.clone() })
            }
            Self::Tmx(_) => {
                let memory = parse_tmx(text, &configured.primary().id)?;
                let locales = discover_locales(configured, &memory.languages);
                tracing::debug!(locales = ?locales.ids(), "Discovered locales from translation memory");
                Ok(LoadedSource { units: memory.units, locales })
            }
        }
    }
}

/// Derives the locale set from language tags found in a translation memory.
///
/// The configured primary locale always comes first, whether or not it
/// appears as a tag. Discovered locales reuse the configured descriptor
/// (switcher labels) when one with the same id exists.
#[must_use]
pub fn discover_locales(configured: &LocaleSet, languages: &[String]) -> LocaleSet {
    let others = languages.iter().map(|language| {
        configured.get(language).cloned().unwrap_or_else(|| Locale::new(language.as_str()))
    });
    LocaleSet::with_primary(configured.primary().clone(), others)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::en_es_locales;

    #[rstest]
    fn discover_locales_puts_primary_first() {
        let configured = en_es_locales();
        let languages = vec!["fr".to_string(), "es".to_string(), "en".to_string()];

        let locales = discover_locales(&configured, &languages);

        assert_eq!(locales.ids(), vec!["en", "fr", "es"]);
        assert_that!(locales.primary().id, eq("en"));
    }

    #[rstest]
    fn discover_locales_reuses_configured_descriptors() {
        let configured = en_es_locales();

        let locales = discover_locales(&configured, &["es".to_string(), "de".to_string()]);

        assert_that!(locales.get("es").unwrap().cue(), eq("En Español"));
        assert_that!(locales.get("de").unwrap().cue(), eq("de"));
        assert_that!(locales.get("en").unwrap().cue(), eq("English"));
    }

    #[rstest]
    fn discover_locales_without_tags_keeps_primary_only() {
        let locales = discover_locales(&en_es_locales(), &[]);

        assert_eq!(locales.ids(), vec!["en"]);
    }

    #[rstest]
    fn load_json_source_uses_configured_locales() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("i18n.json");
        fs::write(&path, r#"{"Welcome": {"es": "Bienvenido"}}"#).unwrap();

        let loaded = LocaleSource::Json(path).load(&en_es_locales()).unwrap();

        assert_that!(loaded.units.len(), eq(1));
        assert_eq!(loaded.locales, en_es_locales());
    }

    #[rstest]
    fn load_tmx_source_discovers_locales() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("site.tmx");
        fs::write(
            &path,
            r#"<tmx version="1.4"><body>
                <tu tuid="Welcome"><tuv xml:lang="fr"><seg>Bienvenue</seg></tuv></tu>
            </body></tmx>"#,
        )
        .unwrap();

        let loaded = LocaleSource::Tmx(path).load(&en_es_locales()).unwrap();

        assert_eq!(loaded.locales.ids(), vec!["en", "fr"]);
        assert_that!(loaded.units[0].variant("fr"), some(eq("Bienvenue")));
    }

    #[rstest]
    fn load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = LocaleSource::Json(temp_dir.path().join("missing.json")).load(&en_es_locales());

        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[rstest]
    #[case::json(LocaleSource::Json(PathBuf::from("a.json")), "i18n")]
    #[case::tmx(LocaleSource::Tmx(PathBuf::from("a.tmx")), "tmx")]
    fn option_name_matches_configuration_key(#[case] source: LocaleSource, #[case] name: &str) {
        assert_that!(source.option_name(), eq(name));
    }
}
