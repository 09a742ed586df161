use async_trait::async_trait;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;

/// Repository port for item persistence
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    /// Persists a new item
    async fn create(&self, item: Item) -> Result<Item, ItemError>;

    /// Finds an item by its unique identifier
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemError>;

    /// Lists all items, newest first
    async fn list_all(&self) -> Result<Vec<Item>, ItemError>;
}

/// Service port defining the item catalog operations
#[async_trait]
pub trait ItemServicePort: Send + Sync + 'static {
    /// Adds an item to the catalog
    async fn create_item(&self, command: CreateItemCommand) -> Result<Item, ItemError>;

    /// Fetches a single item
    ///
    /// # Errors
    /// * `ItemError::NotFound` - No item with this ID
    async fn get_item(&self, id: &ItemId) -> Result<Item, ItemError>;

    /// Lists the whole catalog, newest first
    async fn list_items(&self) -> Result<Vec<Item>, ItemError>;
}
