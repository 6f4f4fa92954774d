//! Declarative input for the metadata builder.
//!
//! Declarations are plain data: they record what a model says about itself
//! and are only interpreted when the registry builds metadata.

mod bundle;
mod model;
mod property;

pub use bundle::ModelDeclarations;
pub use model::{Declared, ModelDecl};
pub use property::{Annotation, PropertyDecl};
