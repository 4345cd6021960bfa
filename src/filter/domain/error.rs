//! Error types for filter domain parsing.

use thiserror::Error;

/// Error returned while parsing a filter operator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown filter operator: {0}")]
pub struct ParseFilterOperatorError(pub String);

/// Error returned while parsing a sort direction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort direction: {0}, expected asc or desc")]
pub struct ParseSortDirectionError(pub String);
