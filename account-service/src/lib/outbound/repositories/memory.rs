use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Username;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemRepository;

/// Account store backed by a shared map, for tests and local development
///
/// Uniqueness checks and the insert run under a single write lock, so this
/// store stays the final arbiter for duplicate identities just like the
/// Postgres one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|a| a.email.as_str() == account.email.as_str())
        {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        if accounts
            .values()
            .any(|a| a.username == account.username)
        {
            return Err(AccountError::UsernameAlreadyExists(
                account.username.as_str().to_string(),
            ));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email.as_str() == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.username == *username)
            .cloned())
    }

    async fn set_confirmed(&self, id: &AccountId) -> Result<(), AccountError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(id) {
            Some(account) => {
                account.confirmed = true;
                account.updated_at = Utc::now();
                Ok(())
            }
            None => Err(AccountError::NotFound(id.to_string())),
        }
    }
}

/// Item store backed by a shared map, for tests and local development
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<ItemId, Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: Item) -> Result<Item, ItemError> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Item>, ItemError> {
        let mut items: Vec<Item> = self.items.read().await.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}
