//! Intermediate representation: variable names and the reference table.

pub mod reference;
pub mod variable;

pub use reference::{
    CollisionPolicy,
    LocaleVariables,
    ReferenceBuilder,
    ReferenceError,
    ReferenceTable,
};
pub use variable::normalize;
