//! Crawler-compatibility fragment injection.
//!
//! Social/search crawlers that do not run scripts get a static fragment
//! (typically server-side meta tags) spliced into the primary page's
//! `<head>`, written next to the regular output under another extension.

use std::path::{
    Path,
    PathBuf,
};

const HEAD_CLOSE: &str = "</head>";

/// Inserts `fragment` immediately before the first `</head>`.
///
/// Plain text splice; when no `</head>` exists the fragment is appended.
///
/// # Examples
/// ```
/// use locale_html::render::inject_before_head_close;
///
/// let html = inject_before_head_close("<head><title>x</title></head><body></body>", "<meta/>");
/// assert_eq!(html, "<head><title>x</title><meta/></head><body></body>");
/// ```
#[must_use]
pub fn inject_before_head_close(html: &str, fragment: &str) -> String {
    let at = html.find(HEAD_CLOSE).unwrap_or(html.len());
    let (before, after) = html.split_at(at);

    let mut result = String::with_capacity(html.len() + fragment.len());
    result.push_str(before);
    result.push_str(fragment);
    result.push_str(after);
    result
}

/// Which rendered output gets the crawler fragment, and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerInjection {
    pub fragment: String,
    /// Template path relative to its source base, e.g. `index.html`.
    pub template: PathBuf,
    pub locale: String,
    /// Extension of the spliced copy, without the dot.
    pub extension: String,
}

impl CrawlerInjection {
    #[must_use]
    pub fn applies_to(&self, relative_template: &Path, locale: &str) -> bool {
        self.locale == locale && self.template == relative_template
    }

    /// Sibling of the regular output with the configured extension.
    #[must_use]
    pub fn output_path(&self, rendered_output: &Path) -> PathBuf {
        rendered_output.with_extension(&self.extension)
    }

    #[must_use]
    pub fn inject(&self, html: &str) -> String {
        inject_before_head_close(html, &self.fragment)
    }
}
