use thiserror::Error;

/// Errors raised while reading a locale source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read locale source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON dictionary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse translation memory: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The dictionary root must be an object of phrase → translations.
    #[error("Expected a JSON object at the root of the dictionary, found {0}")]
    UnexpectedRoot(&'static str),

    #[error("Expected <{expected}> as the root element, found <{found}>")]
    UnexpectedElement { expected: &'static str, found: String },

    #[error("Translation memory has no <body> element")]
    MissingBody,
}
