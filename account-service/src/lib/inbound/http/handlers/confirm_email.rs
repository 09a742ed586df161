use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

const EMAIL_CONFIRMED_MESSAGE: &str = "Email confirmed. You can now sign in.";

pub async fn confirm_email(
    State(state): State<AppState>,
    Query(query): Query<ConfirmEmailQuery>,
) -> Result<ApiSuccess<ConfirmEmailResponseData>, ApiError> {
    state
        .account_service
        .confirm_email(&query.token)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                ConfirmEmailResponseData {
                    message: EMAIL_CONFIRMED_MESSAGE.to_string(),
                },
            )
        })
}

/// Query parameters for the confirmation link
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfirmEmailQuery {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmEmailResponseData {
    pub message: String,
}
