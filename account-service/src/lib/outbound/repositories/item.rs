use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemName;
use crate::domain::item::ports::ItemRepository;

/// PostgreSQL implementation of the item repository
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = ItemError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: ItemId(row.id),
            name: ItemName::new(row.name)?,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn create(&self, item: Item) -> Result<Item, ItemError> {
        sqlx::query(
            r#"
            INSERT INTO items (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.id.0)
        .bind(item.name.as_str())
        .bind(&item.description)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        Ok(item)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, created_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        row.map(Item::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Item>, ItemError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, description, created_at
            FROM items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Item::try_from).collect()
    }
}
