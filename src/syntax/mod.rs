//! Template syntax.

pub mod template;

pub use template::{
    Segment,
    Template,
    TemplateError,
};
