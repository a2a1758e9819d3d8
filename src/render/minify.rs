//! HTML minification.

use super::PostProcessError;

/// Collapses whitespace and strips comments from rendered HTML.
///
/// Closing tags (notably `</head>`) are kept so crawler injection still has
/// a marker to splice at. Inline CSS and JS are left untouched.
pub fn minify(html: &str) -> Result<String, PostProcessError> {
    let cfg = minify_html::Cfg {
        do_not_minify_doctype: true,
        keep_closing_tags: true,
        keep_html_and_head_opening_tags: true,
        keep_comments: false,
        minify_css: false,
        minify_js: false,
        ..minify_html::Cfg::default()
    };
    let minified = minify_html::minify(html.as_bytes(), &cfg);
    Ok(String::from_utf8(minified)?)
}
