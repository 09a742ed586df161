use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::confirm_email::confirm_email;
use super::handlers::items::create_item;
use super::handlers::items::get_item;
use super::handlers::items::list_items;
use super::handlers::me::me;
use super::handlers::signin::signin;
use super::handlers::signup::signup;
use super::middleware::authorize as auth_middleware;
use crate::domain::account::gate::AuthenticationGate;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::item::ports::ItemServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub item_service: Arc<dyn ItemServicePort>,
    pub gate: Arc<AuthenticationGate>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    item_service: Arc<dyn ItemServicePort>,
    gate: Arc<AuthenticationGate>,
) -> Router {
    let state = AppState {
        account_service,
        item_service,
        gate,
    };

    let public_routes = Router::new()
        .route("/accounts/signup", post(signup))
        .route("/accounts/confirm", get(confirm_email))
        .route("/accounts/signin", post(signin))
        .route("/items", post(create_item))
        .route("/items", get(list_items))
        .route("/items/:item_id", get(get_item));

    let protected_routes = Router::new().route("/accounts/me", get(me)).route_layer(
        middleware::from_fn_with_state(state.gate.clone(), auth_middleware),
    );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                headers = ?request.headers(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
