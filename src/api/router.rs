use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, draft, event, field, guest, health};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))

        // Field catalogue
        .route("/api/v1/fields", get(field::list_fields).post(field::create_field))

        // Events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{event_id}", delete(event::delete_event))

        // Guest management
        .route("/api/v1/events/by-link/{link}/guests", get(guest::list_guests))
        .route("/api/v1/events/by-link/{link}/guests/export", get(guest::export_guests))
        .route("/api/v1/events/by-link/{link}/grouping", get(guest::grouping))
        .route("/api/v1/events/by-link/{link}/grouping/export", get(guest::export_grouping))
        .route("/api/v1/guests/{guest_id}", delete(guest::remove_guest))

        // Public confirmation flow
        .route("/api/v1/public/events/{link}", get(event::get_public_event))
        .route("/api/v1/public/guests", post(guest::confirm_guest))

        // Drafts
        .route("/api/v1/drafts", post(draft::create_draft))
        .route("/api/v1/drafts/{draft_id}", get(draft::get_draft).delete(draft::delete_draft))
        .route("/api/v1/drafts/{draft_id}/fields", put(draft::set_draft_field))
        .route("/api/v1/drafts/{draft_id}/toggle-sync-link", post(draft::toggle_sync_link))
        .route("/api/v1/drafts/{draft_id}/reset", post(draft::reset_draft))
        .route("/api/v1/drafts/{draft_id}/submit", post(draft::submit_draft))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
