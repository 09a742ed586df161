use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::item::models::Item;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_items(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ItemSummaryData>>, ApiError> {
    state
        .item_service
        .list_items()
        .await
        .map_err(ApiError::from)
        .map(|items| {
            ApiSuccess::new(
                StatusCode::OK,
                items.iter().map(ItemSummaryData::from).collect::<Vec<_>>(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummaryData {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Item> for ItemSummaryData {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.as_str().to_string(),
            description: item.description.clone(),
            created_at: item.created_at,
        }
    }
}
