//! Router and handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::HeaderName;
use axum::http::Request;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{debug, warn, Level};

use super::auth::require_token;
use super::error::ApiError;
use super::response::{MessageResponse, TrendingResponse};
use super::state::AppState;
use crate::port::PostEvent;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the HTTP router.
///
/// `/trending` answers both GET and POST. `/healthz` is the only route that
/// does not require a bearer token.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/trending", get(trending).post(trending))
        .route("/post-events", post(post_event))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    let router = Router::new()
        .route("/healthz", get(healthz))
        .merge(protected)
        .with_state(state);

    apply_standard_layers(router)
}

/// Request tracing plus `x-request-id` generation and echo.
fn apply_standard_layers(router: Router) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(trace)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn trending(State(state): State<AppState>) -> Result<Json<TrendingResponse>, ApiError> {
    match state.api().trending().await {
        Ok(topics) => Ok(Json(TrendingResponse::new(topics))),
        Err(e) => {
            warn!(error = %e, "Trending query failed");
            Err(ApiError::Trending(e))
        }
    }
}

async fn post_event(
    State(state): State<AppState>,
    payload: Result<Json<PostEvent>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(event) = payload.map_err(|rejection| ApiError::InvalidEvent(rejection.body_text()))?;

    debug!(kind = event.kind(), post_id = %event.post_id(), "Post event received");
    state.api().apply(event).await;
    Ok(Json(MessageResponse::ok("Event applied")))
}
