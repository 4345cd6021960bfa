//! Error types for task domain parsing.

use thiserror::Error;

/// Error returned while parsing an attribute type tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown attribute type: {0}")]
pub struct ParseAttributeTypeError(pub String);
