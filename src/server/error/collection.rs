use thiserror::Error;

/// Errors raised while parsing collection query parameters.
///
/// All variants result in 400 Bad Request with the message returned to the client.
#[derive(Error, Debug, PartialEq)]
pub enum CollectionError {
    #[error("Filter must be a JSON object: {0}")]
    InvalidFilter(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' cannot be filtered")]
    NotFilterable(String),

    #[error("Field '{0}' cannot be sorted")]
    NotSortable(String),

    #[error("Operator '{operator}' is not supported for field '{field}'")]
    UnsupportedOperator { field: String, operator: String },

    #[error("Invalid value for field '{field}': expected {expected}")]
    InvalidValue {
        field: String,
        expected: &'static str,
    },

    #[error("Limit must be between 1 and {max}, got {limit}")]
    InvalidLimit { limit: u64, max: u64 },

    #[error("Page {page} is out of range for limit {limit}")]
    InvalidPage { page: u64, limit: u64 },
}
