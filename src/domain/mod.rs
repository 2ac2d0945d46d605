//! Domain layer: tree model, extraction and stub formatting
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod matcher;
pub mod node;
pub mod stub;

pub use error::DomainError;
pub use matcher::NameMatcher;
pub use node::{Scalar, Traverse, TreeNode};
pub use stub::{
    escape_c_string, format_record, ExtractionRecord, OutputDocument, AUTOGENERATED_MARKER,
    DEFAULT_CONTEXT, INCLUDE_LINE,
};
