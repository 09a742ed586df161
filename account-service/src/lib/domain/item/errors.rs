use thiserror::Error;

/// Error for ItemId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for item name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemNameError {
    #[error("Item name must not be empty")]
    Empty,
}

/// Top-level error for item operations
#[derive(Debug, Clone, Error)]
pub enum ItemError {
    #[error("Invalid item ID: {0}")]
    InvalidItemId(#[from] ItemIdError),

    #[error("Invalid item name: {0}")]
    InvalidName(#[from] ItemNameError),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ItemError {
    fn from(err: anyhow::Error) -> Self {
        ItemError::Unknown(err.to_string())
    }
}
