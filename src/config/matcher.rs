//! Template discovery for file mappings.

use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use globset::{
    GlobBuilder,
    GlobMatcher,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid source pattern '{pattern}': {source}")]
    InvalidSourcePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// A template found for a file mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path used to read the template.
    pub path: PathBuf,
    /// Path below the pattern's literal base directory; this is what lands
    /// under `dest/<locale>/`.
    pub relative: PathBuf,
}

/// Templates found for a mapping, plus literal sources that do not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub templates: Vec<TemplateFile>,
    pub missing: Vec<PathBuf>,
}

/// Expands mapping source patterns relative to a base directory.
///
/// Patterns prefixed with `!` exclude matches (matched against the path
/// relative to the base directory). `*` does not cross `/`; `**` does.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    base_dir: PathBuf,
}

impl FileMatcher {
    #[must_use]
    pub const fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Finds the templates named by `patterns`, sorted and de-duplicated.
    pub fn expand(&self, patterns: &[String]) -> Result<Expansion, MatcherError> {
        let (excludes, includes): (Vec<&String>, Vec<&String>) =
            patterns.iter().partition(|pattern| pattern.starts_with('!'));
        let exclude_set = Self::build_exclude_set(&excludes)?;

        let mut expansion = Expansion::default();
        let mut seen = HashSet::new();

        for pattern in includes {
            let (base, glob) = split_pattern(pattern);
            let found = match glob {
                None => {
                    let path = self.base_dir.join(&base);
                    if !path.is_file() {
                        expansion.missing.push(path);
                        continue;
                    }
                    let relative = base.file_name().map_or_else(|| base.clone(), PathBuf::from);
                    vec![TemplateFile { path, relative }]
                }
                Some(glob) => {
                    let matcher = GlobBuilder::new(&glob)
                        .literal_separator(true)
                        .build()
                        .map_err(|source| MatcherError::InvalidSourcePattern {
                            pattern: pattern.clone(),
                            source,
                        })?
                        .compile_matcher();
                    let found = self.walk(&base, &matcher);
                    if found.is_empty() {
                        tracing::warn!("The source pattern \"{}\" did not match any files.", pattern);
                    }
                    found
                }
            };

            for template in found {
                let from_base = template.path.strip_prefix(&self.base_dir).unwrap_or(&template.path);
                if exclude_set.is_match(from_base) {
                    tracing::debug!(path = %template.path.display(), "Excluded by pattern");
                    continue;
                }
                if seen.insert(template.path.clone()) {
                    expansion.templates.push(template);
                }
            }
        }

        Ok(expansion)
    }

    fn build_exclude_set(excludes: &[&String]) -> Result<GlobSet, MatcherError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in excludes {
            let glob = pattern.strip_prefix('!').unwrap_or(pattern);
            let glob = GlobBuilder::new(glob).literal_separator(true).build().map_err(|source| {
                MatcherError::InvalidExcludePattern { pattern: (*pattern).clone(), source }
            })?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Walks `base` (relative to the base directory) for files matching `matcher`.
    fn walk(&self, base: &Path, matcher: &GlobMatcher) -> Vec<TemplateFile> {
        let root = self.base_dir.join(base);
        let mut found = Vec::new();

        for result in WalkBuilder::new(&root).standard_filters(false).follow_links(false).build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative) = path.strip_prefix(&root) else {
                continue;
            };
            if matcher.is_match(relative) {
                found.push(TemplateFile { path: path.to_path_buf(), relative: relative.to_path_buf() });
            }
        }

        found.sort_by(|a, b| a.relative.cmp(&b.relative));
        found
    }
}

/// Splits a pattern into its literal leading directories and the glob part.
///
/// `templates/**/*.html` → (`templates`, `Some("**/*.html")`);
/// `templates/index.html` → (`templates/index.html`, `None`).
#[must_use]
pub fn split_pattern(pattern: &str) -> (PathBuf, Option<String>) {
    let components: Vec<&str> = pattern.split('/').collect();
    let Some(first_glob) = components.iter().position(|component| is_glob(component)) else {
        return (PathBuf::from(pattern), None);
    };

    let (literal, rest) = components.split_at(first_glob);
    let base: PathBuf = literal.iter().filter(|c| !c.is_empty() && **c != ".").collect();
    (base, Some(rest.join("/")))
}

fn is_glob(component: &str) -> bool {
    component.contains(['*', '?', '[', '{'])
}
