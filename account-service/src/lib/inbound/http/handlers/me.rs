use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::middleware::AuthenticatedAccount;

/// Identity probe for a bearer token. The middleware already authorized the
/// request, so reaching this handler is the whole answer.
pub async fn me(Extension(account): Extension<AuthenticatedAccount>) -> StatusCode {
    tracing::debug!(account_id = %account.account_id, "Bearer token accepted");
    StatusCode::NO_CONTENT
}
