//! Translation key → template variable name conversion.

/// Names longer than this are cut and marked with [`TRUNCATION_MARKER`].
pub const MAX_VARIABLE_LENGTH: usize = 30;

pub const TRUNCATION_MARKER: char = '_';

/// Converts arbitrary human-readable key text into a template variable name.
///
/// Every whitespace-delimited word is capitalized, everything that is not an
/// ASCII letter or digit is dropped, the result is cut to
/// [`MAX_VARIABLE_LENGTH`] characters (plus a trailing marker when cut), a
/// leading digit is guarded with `_` and finally the first character is
/// lowercased. A digit-led name that needs cutting loses one more character
/// so the guard still fits the bound.
///
/// The output never starts with a digit and is at most
/// `MAX_VARIABLE_LENGTH + 1` characters long. Empty or symbol-only input
/// yields an empty string.
///
/// # Examples
/// ```
/// use locale_html::ir::variable::normalize;
///
/// assert_eq!(normalize("Hello World"), "helloWorld");
/// assert_eq!(normalize("404 - Page not found"), "_404PageNotFound");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut name: String =
        capitalize_words(text).chars().filter(char::is_ascii_alphanumeric).collect();

    let digit_led = name.starts_with(|c: char| c.is_ascii_digit());

    // ASCII only at this point, so byte length == char count.
    if name.len() > MAX_VARIABLE_LENGTH {
        name.truncate(if digit_led { MAX_VARIABLE_LENGTH - 1 } else { MAX_VARIABLE_LENGTH });
        name.push(TRUNCATION_MARKER);
    }

    if digit_led {
        name.insert(0, '_');
    }

    lowercase_first(&name)
}

/// Uppercases the first character of the text and of every word after whitespace.
fn capitalize_words(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            result.push(ch.to_ascii_uppercase());
        } else {
            result.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    result
}

fn lowercase_first(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        let mut result = String::with_capacity(name.len());
        result.push(first.to_ascii_lowercase());
        result.push_str(chars.as_str());
        result
    })
}
