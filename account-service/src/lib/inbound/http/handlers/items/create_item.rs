use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::item::errors::ItemNameError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemName;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<ApiSuccess<CreateItemResponseData>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .item_service
        .create_item(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref item| ApiSuccess::new(StatusCode::CREATED, item.into()))
}

/// HTTP request body for adding an item (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateItemRequest {
    name: String,
    description: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateItemRequestError {
    #[error("Invalid item name: {0}")]
    Name(#[from] ItemNameError),
}

impl CreateItemRequest {
    fn try_into_command(self) -> Result<CreateItemCommand, ParseCreateItemRequestError> {
        let name = ItemName::new(self.name)?;
        Ok(CreateItemCommand::new(name, self.description))
    }
}

impl From<ParseCreateItemRequestError> for ApiError {
    fn from(err: ParseCreateItemRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateItemResponseData {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Item> for CreateItemResponseData {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.as_str().to_string(),
            description: item.description.clone(),
            created_at: item.created_at,
        }
    }
}
