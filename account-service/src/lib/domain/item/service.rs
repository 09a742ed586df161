use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemRepository;
use crate::domain::item::ports::ItemServicePort;

/// Service implementing the item catalog logic
pub struct ItemService<IR>
where
    IR: ItemRepository,
{
    repository: Arc<IR>,
}

impl<IR> ItemService<IR>
where
    IR: ItemRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<IR> ItemServicePort for ItemService<IR>
where
    IR: ItemRepository,
{
    async fn create_item(&self, command: CreateItemCommand) -> Result<Item, ItemError> {
        let item = Item {
            id: ItemId::new(),
            name: command.name,
            description: command.description,
            created_at: Utc::now(),
        };

        self.repository.create(item).await
    }

    async fn get_item(&self, id: &ItemId) -> Result<Item, ItemError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id.to_string()))
    }

    async fn list_items(&self) -> Result<Vec<Item>, ItemError> {
        self.repository.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::item::models::ItemName;

    mock! {
        pub TestItemRepository {}

        #[async_trait]
        impl ItemRepository for TestItemRepository {
            async fn create(&self, item: Item) -> Result<Item, ItemError>;
            async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemError>;
            async fn list_all(&self) -> Result<Vec<Item>, ItemError>;
        }
    }

    fn test_item(name: &str) -> Item {
        Item {
            id: ItemId::new(),
            name: ItemName::new(name.to_string()).unwrap(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_item_assigns_id() {
        let mut repository = MockTestItemRepository::new();
        repository
            .expect_create()
            .withf(|item| item.name.as_str() == "Widget" && item.description.is_none())
            .times(1)
            .returning(|item| Ok(item));

        let service = ItemService::new(Arc::new(repository));

        let command = CreateItemCommand::new(ItemName::new("Widget".to_string()).unwrap(), None);
        let item = service.create_item(command).await.unwrap();
        assert_eq!(item.name.as_str(), "Widget");
    }

    #[tokio::test]
    async fn test_get_item_found() {
        let mut repository = MockTestItemRepository::new();
        let item = test_item("Widget");
        let item_id = item.id;

        repository
            .expect_find_by_id()
            .withf(move |id| *id == item_id)
            .times(1)
            .returning(move |_| Ok(Some(item.clone())));

        let service = ItemService::new(Arc::new(repository));

        let found = service.get_item(&item_id).await.unwrap();
        assert_eq!(found.id, item_id);
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let mut repository = MockTestItemRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ItemService::new(Arc::new(repository));

        let result = service.get_item(&ItemId::new()).await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_items_passes_through() {
        let mut repository = MockTestItemRepository::new();
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![test_item("Newest"), test_item("Oldest")]));

        let service = ItemService::new(Arc::new(repository));

        let items = service.list_items().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name.as_str(), "Newest");
    }
}
