use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::domain::account::models::Account;
use crate::inbound::http::router::AppState;

pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<SigninResponseData>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    // Credential proof comes first; the confirmation state is only
    // consulted once the caller has proven ownership
    let account = state
        .gate
        .verify_credentials(&body.email, &body.password)
        .await
        .map_err(ApiError::from)?;

    // Confirmed-state check and token issuance
    let grant = state
        .account_service
        .signin(account)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SigninResponseData {
            token: grant.token.clone(),
            account: (&grant.account).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigninResponseData {
    pub token: String,
    pub account: AccountData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub email: String,
    pub username: String,
    pub birthday: Option<NaiveDate>,
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.as_str().to_string(),
            username: account.username.as_str().to_string(),
            birthday: account.birthday,
            confirmed: account.confirmed,
            created_at: account.created_at,
        }
    }
}
