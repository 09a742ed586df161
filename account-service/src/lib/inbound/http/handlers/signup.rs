use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordRuleError;
use crate::account::errors::UsernameError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::SignupCommand;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

const SIGNUP_ACCEPTED_MESSAGE: &str = "Account created. Check your email for a confirmation link.";

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .account_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        // The stored account is never echoed back; the caller gets pointed
        // at their inbox instead
        .map(|_| {
            ApiSuccess::new(
                StatusCode::CREATED,
                SignupResponseData {
                    message: SIGNUP_ACCEPTED_MESSAGE.to_string(),
                },
            )
        })
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    email: String,
    username: String,
    password: String,
    birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordRuleError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let email = EmailAddress::new(self.email)?;
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        Ok(SignupCommand::new(email, username, password, self.birthday))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub message: String,
}
