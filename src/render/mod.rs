//! Rendering templates against a locale's variables, plus post-processing.

pub mod crawler;
mod error;
pub mod minify;

pub use crawler::{
    CrawlerInjection,
    inject_before_head_close,
};
pub use error::{
    PostProcessError,
    RenderError,
};
pub use minify::minify;

use crate::ir::LocaleVariables;
use crate::syntax::{
    Segment,
    Template,
};

/// Substitutes every variable reference in `template` from `variables`.
///
/// Fails on the first name that `variables` does not define. Names defined
/// without a value render as the empty string.
pub fn render(template: &Template, variables: &LocaleVariables) -> Result<String, RenderError> {
    let mut output = String::new();
    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Variable { name, escape, line } => {
                let Some(value) = variables.get(name) else {
                    return Err(RenderError::UndefinedVariable { name: name.clone(), line: *line });
                };
                let value = value.unwrap_or_default();
                if *escape {
                    push_escaped(&mut output, value);
                } else {
                    output.push_str(value);
                }
            }
        }
    }
    Ok(output)
}

/// Parses and renders template text in one step.
///
/// # Examples
/// ```
/// use locale_html::ir::LocaleVariables;
/// use locale_html::render::render_str;
///
/// let variables: LocaleVariables = [("welcome", "Bienvenido")].into_iter().collect();
/// let html = render_str("<h1><%= welcome %></h1>", &variables).unwrap();
/// assert_eq!(html, "<h1>Bienvenido</h1>");
/// ```
pub fn render_str(text: &str, variables: &LocaleVariables) -> Result<String, RenderError> {
    let template = Template::parse(text)?;
    render(&template, variables)
}

fn push_escaped(output: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            '`' => output.push_str("&#x60;"),
            _ => output.push(ch),
        }
    }
}
