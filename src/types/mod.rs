//! Data types for the declarative document model.

mod component;
mod document;
mod style;

pub use component::*;
pub use document::*;
pub use style::*;
