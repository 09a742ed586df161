use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::account::gate::AuthenticationGate;
use crate::domain::account::models::AccountId;

/// Extension type to store the authorized account ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Middleware that authorizes bearer tokens and adds the account to request extensions
///
/// Only API-audience tokens pass; confirmation tokens are rejected here with
/// the same 401 as any other invalid token.
pub async fn authorize(
    State(gate): State<Arc<AuthenticationGate>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Authorize against the API audience and resolve the account ID
    let account_id = gate.authorize(token).map_err(|e| {
        tracing::warn!("Bearer token rejected: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid or expired token"
            })),
        )
            .into_response()
    })?;

    // Add the authorized account to request extensions
    req.extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Missing Authorization header"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header"
            })),
        )
            .into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header format. Expected: Bearer <token>"
            })),
        )
            .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
