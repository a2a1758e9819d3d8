//! Locale source readers: JSON dictionaries and translation-memory documents.

mod error;
pub mod source;
pub mod tmx;
pub mod translation;

pub use error::SourceError;
pub use source::{
    LoadedSource,
    LocaleSource,
    discover_locales,
};
pub use tmx::{
    TranslationMemory,
    parse_tmx,
};
pub use translation::{
    TranslationUnit,
    parse_dictionary,
};
