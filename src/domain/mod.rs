//! Domain layer: tree model, construction and glyph styles
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod nested;
pub mod style;
pub mod value;

pub use arena::{Entry, NodeId, TreeArena, TreeIterator, TreeNode};
pub use builder::TreeBuilder;
pub use error::{DomainError, TreeResult};
pub use nested::Nested;
pub use style::{Glyph, Style, StylePreset};
pub use value::Value;
