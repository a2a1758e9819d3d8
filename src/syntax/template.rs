//! Parser for `<%= name %>` / `<%- name %>` placeholder templates.

use thiserror::Error;

const OPEN: &str = "<%";
const CLOSE: &str = "%>";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unterminated `<%` tag at line {line}")]
    Unterminated { line: usize },

    #[error("code blocks are not supported (line {line}): `<%{code}%>`")]
    UnsupportedBlock { line: usize, code: String },

    #[error("`{expression}` at line {line} is not a plain variable name")]
    UnsupportedExpression { line: usize, expression: String },
}

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// A variable reference; `escape` is set for `<%- %>` tags.
    Variable { name: String, escape: bool, line: usize },
}

/// A parsed template, ready to be rendered against any number of locales.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Splits template text into literal text and variable references.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some(start) = rest.find(OPEN) {
            let (literal, tag) = rest.split_at(start);
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_string()));
            }

            let line = line_number(text, text.len() - tag.len());
            let inner = tag.strip_prefix(OPEN).unwrap_or(tag);
            let Some(end) = inner.find(CLOSE) else {
                return Err(TemplateError::Unterminated { line });
            };
            let (body, after) = inner.split_at(end);

            segments.push(parse_tag(body, line)?);
            rest = after.strip_prefix(CLOSE).unwrap_or(after);
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Referenced variable names, in order of appearance (may repeat).
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

fn parse_tag(body: &str, line: usize) -> Result<Segment, TemplateError> {
    let (expression, escape) = if let Some(expression) = body.strip_prefix('=') {
        (expression, false)
    } else if let Some(expression) = body.strip_prefix('-') {
        (expression, true)
    } else {
        return Err(TemplateError::UnsupportedBlock { line, code: body.to_string() });
    };

    let name = expression.trim();
    if !is_identifier(name) {
        return Err(TemplateError::UnsupportedExpression { line, expression: name.to_string() });
    }

    Ok(Segment::Variable { name: name.to_string(), escape, line })
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn line_number(text: &str, offset: usize) -> usize {
    text.get(..offset).map_or(0, |before| before.matches('\n').count()) + 1
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn var(name: &str, escape: bool, line: usize) -> Segment {
        Segment::Variable { name: name.to_string(), escape, line }
    }

    fn lit(text: &str) -> Segment {
        Segment::Literal(text.to_string())
    }

    #[rstest]
    fn parse_single_placeholder() {
        let template = Template::parse("<h1><%= welcome %></h1>").unwrap();

        assert_eq!(template.segments(), &[lit("<h1>"), var("welcome", false, 1), lit("</h1>")]);
    }

    #[rstest]
    fn parse_escaped_placeholder_and_line_numbers() {
        let template = Template::parse("<title>\n<%-title%>\n</title>\n<p><%=  body  %></p>").unwrap();

        let variables: Vec<_> = template
            .segments()
            .iter()
            .filter(|s| matches!(s, Segment::Variable { .. }))
            .cloned()
            .collect();
        assert_eq!(variables, vec![var("title", true, 2), var("body", false, 4)]);
    }

    #[rstest]
    fn parse_text_without_placeholders() {
        let template = Template::parse("<p>static</p>").unwrap();

        assert_eq!(template.segments(), &[lit("<p>static</p>")]);
        assert_that!(template.variables().count(), eq(0));
    }

    #[rstest]
    fn parse_empty_text() {
        let template = Template::parse("").unwrap();

        assert_that!(template.segments().is_empty(), eq(true));
    }

    #[rstest]
    fn parse_adjacent_placeholders() {
        let template = Template::parse("<%= a %><%= b %>").unwrap();

        assert_eq!(template.variables().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[rstest]
    #[case::identifier_with_dollar("<%= $price %>", "$price")]
    #[case::underscore_prefixed("<%= _404PageNotFound %>", "_404PageNotFound")]
    fn parse_accepts_identifiers(#[case] text: &str, #[case] name: &str) {
        let template = Template::parse(text).unwrap();

        assert_eq!(template.variables().collect::<Vec<_>>(), vec![name]);
    }

    #[rstest]
    fn parse_unterminated_tag() {
        let result = Template::parse("<p>\n<%= welcome </p>");

        assert_that!(result, err(eq(&TemplateError::Unterminated { line: 2 })));
    }

    #[rstest]
    fn parse_code_block_is_unsupported() {
        let result = Template::parse("<% if (x) { %>yes<% } %>");

        assert_that!(
            result,
            err(eq(&TemplateError::UnsupportedBlock { line: 1, code: " if (x) { ".to_string() }))
        );
    }

    #[rstest]
    #[case::member_access("<%= user.name %>", "user.name")]
    #[case::call("<%= format(x) %>", "format(x)")]
    #[case::leading_digit("<%= 1st %>", "1st")]
    #[case::empty("<%= %>", "")]
    fn parse_rejects_expressions(#[case] text: &str, #[case] expression: &str) {
        let result = Template::parse(text);

        assert_that!(
            result,
            err(eq(&TemplateError::UnsupportedExpression {
                line: 1,
                expression: expression.to_string()
            }))
        );
    }
}
