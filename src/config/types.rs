use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::input::LocaleSource;
use crate::ir::CollisionPolicy;
use crate::types::{
    Locale,
    LocaleSet,
    LocaleSetError,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "files[0].src")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("The file \"{}\" given by \"{option}\" was not found", .path.display())]
    MissingFile { option: &'static str, path: PathBuf },

    #[error("Failed to read \"{}\" given by \"{option}\": {source}", .path.display())]
    ReadFile {
        option: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid locales: {0}")]
    Locales(#[from] LocaleSetError),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One or more source patterns; `"src": "a/*.html"` or `"src": ["a/*.html", "!a/_*.html"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SourcePatterns {
    One(String),
    Many(Vec<String>),
}

impl SourcePatterns {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(pattern) => std::slice::from_ref(pattern),
            Self::Many(patterns) => patterns,
        }
    }
}

/// Templates to render and where their output goes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMapping {
    pub src: SourcePatterns,
    pub dest: PathBuf,
    /// Render only this locale for the mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskSettings {
    /// JSON dictionary source. Mutually exclusive with `tmx`.
    pub i18n: Option<PathBuf>,
    /// Translation-memory source. Mutually exclusive with `i18n`.
    pub tmx: Option<PathBuf>,

    /// Where the reference table is written.
    pub variables_file: PathBuf,

    /// Write every output directly under `dest/<locale>/`, dropping subdirectories.
    pub flatten: bool,
    pub minify: bool,
    /// Write primary-locale output directly under `dest/`.
    pub omit_primary_slug: bool,

    pub locales: Vec<Locale>,
    pub on_collision: CollisionPolicy,

    /// Fragment spliced into the crawler copy of the index page.
    #[serde(rename = "fbCrawlerPHP")]
    pub fb_crawler_php: Option<PathBuf>,
    pub crawler_template: String,
    /// Defaults to the primary locale.
    pub crawler_locale: Option<String>,
    pub crawler_extension: String,

    pub files: Vec<FileMapping>,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            i18n: None,
            tmx: None,
            variables_file: PathBuf::from("variables.json"),
            flatten: false,
            minify: false,
            omit_primary_slug: false,
            locales: vec![
                Locale::primary("en").with_cue("English", "en"),
                Locale::new("es").with_cue("En Español", "es"),
            ],
            on_collision: CollisionPolicy::default(),
            fb_crawler_php: None,
            crawler_template: "index.html".to_string(),
            crawler_locale: None,
            crawler_extension: "php".to_string(),
            files: Vec::new(),
        }
    }
}

impl TaskSettings {
    /// # Errors
    /// - Missing or ambiguous locale source
    /// - Invalid locale declarations
    /// - Empty or invalid file mappings
    /// - Unknown locale references
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        match (&self.i18n, &self.tmx) {
            (None, None) => errors.push(ValidationError::new(
                "i18n",
                "A locale source is required. Set \"i18n\" to a JSON dictionary or \"tmx\" to a translation memory file",
            )),
            (Some(_), Some(_)) => errors.push(ValidationError::new(
                "i18n/tmx",
                "Cannot specify both 'i18n' and 'tmx'. Please use only one",
            )),
            _ => {}
        }

        for (index, locale) in self.locales.iter().enumerate() {
            if locale.id.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("locales[{index}].id"),
                    "The locale id cannot be empty. Example: \"en\"",
                ));
            }
        }
        if let Err(e) = LocaleSet::new(self.locales.clone()) {
            errors.push(ValidationError::new("locales", e.to_string()));
        }

        if self.variables_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "variablesFile",
                "The path cannot be empty. Example: \"variables.json\"",
            ));
        }

        if self.files.is_empty() {
            errors.push(ValidationError::new(
                "files",
                "At least one file mapping is required. Example: [{\"src\": \"templates/**/*.html\", \"dest\": \"dist\"}]",
            ));
        }

        for (index, mapping) in self.files.iter().enumerate() {
            self.validate_mapping(index, mapping, &mut errors);
        }

        if self.crawler_extension.is_empty() || self.crawler_extension.starts_with('.') {
            errors.push(ValidationError::new(
                "crawlerExtension",
                "The extension must be non-empty and given without a leading dot. Example: \"php\"",
            ));
        }

        // TMX locales are only known once the source is read.
        if self.i18n.is_some()
            && let Some(locale) = &self.crawler_locale
            && !self.declares_locale(locale)
        {
            errors.push(ValidationError::new(
                "crawlerLocale",
                format!("Locale '{locale}' is not declared in \"locales\""),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn validate_mapping(&self, index: usize, mapping: &FileMapping, errors: &mut Vec<ValidationError>) {
        let patterns = mapping.src.as_slice();
        if patterns.is_empty() {
            errors.push(ValidationError::new(
                format!("files[{index}].src"),
                "At least one source pattern is required. Example: \"templates/*.html\"",
            ));
        }

        for (pattern_index, pattern) in patterns.iter().enumerate() {
            let glob = pattern.strip_prefix('!').unwrap_or(pattern);
            if glob.is_empty() {
                errors.push(ValidationError::new(
                    format!("files[{index}].src[{pattern_index}]"),
                    "The pattern cannot be empty",
                ));
            } else if let Err(e) = globset::Glob::new(glob) {
                errors.push(ValidationError::new(
                    format!("files[{index}].src[{pattern_index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if mapping.dest.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                format!("files[{index}].dest"),
                "The destination cannot be empty. Example: \"dist\"",
            ));
        }

        if self.i18n.is_some()
            && let Some(locale) = &mapping.locale
            && !self.declares_locale(locale)
        {
            errors.push(ValidationError::new(
                format!("files[{index}].locale"),
                format!("Locale '{locale}' is not declared in \"locales\""),
            ));
        }
    }

    fn declares_locale(&self, id: &str) -> bool {
        self.locales.iter().any(|locale| locale.id == id)
    }

    /// The configured locale source, `i18n` taking precedence.
    #[must_use]
    pub fn locale_source(&self) -> Option<LocaleSource> {
        self.i18n
            .clone()
            .map(LocaleSource::Json)
            .or_else(|| self.tmx.clone().map(LocaleSource::Tmx))
    }
}
