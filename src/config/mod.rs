//! Task configuration: settings file, validation and template discovery.
mod loader;
mod manager;
pub mod matcher;
mod types;

pub use loader::DEFAULT_CONFIG_FILE;
pub use manager::TaskConfig;
pub use matcher::{
    Expansion,
    FileMatcher,
    MatcherError,
    TemplateFile,
};
pub use types::{
    ConfigError,
    FileMapping,
    SourcePatterns,
    TaskSettings,
    ValidationError,
};
