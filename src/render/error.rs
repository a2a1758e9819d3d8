use thiserror::Error;

use crate::syntax::TemplateError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid template syntax: {0}")]
    Syntax(#[from] TemplateError),

    #[error("variable `{name}` (line {line}) is not defined")]
    UndefinedVariable { name: String, line: usize },
}

#[derive(Error, Debug)]
pub enum PostProcessError {
    #[error("minification produced invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
