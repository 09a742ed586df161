use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<ApiSuccess<GetItemResponseData>, ApiError> {
    let item_id =
        ItemId::from_string(&item_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .item_service
        .get_item(&item_id)
        .await
        .map_err(ApiError::from)
        .map(|ref item| ApiSuccess::new(StatusCode::OK, item.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetItemResponseData {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Item> for GetItemResponseData {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.as_str().to_string(),
            description: item.description.clone(),
            created_at: item.created_at,
        }
    }
}
