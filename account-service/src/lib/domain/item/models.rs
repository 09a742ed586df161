use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::item::errors::ItemIdError;
use crate::domain::item::errors::ItemNameError;

/// Unique identifier for a catalog item (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ItemIdError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ItemIdError::InvalidFormat(s.to_string()))
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated item name, never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: String) -> Result<Self, ItemNameError> {
        if name.is_empty() {
            return Err(ItemNameError::Empty);
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog item entity
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub name: ItemName,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Command to add a new item to the catalog
#[derive(Debug, Clone)]
pub struct CreateItemCommand {
    pub name: ItemName,
    pub description: Option<String>,
}

impl CreateItemCommand {
    pub fn new(name: ItemName, description: Option<String>) -> Self {
        Self { name, description }
    }
}
