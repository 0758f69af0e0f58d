//! Webhook ingestion handler.
//!
//! Processes Vapi end-of-call reports in four sequential stages:
//! authenticate, filter by event type, extract and render, persist. Each
//! stage runs once; the first failure short-circuits the rest.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use ghostwriter_core::{
    models::CallReport, note, WebhookEnvelope, NOTE_CONTENT_TYPE,
};
use tracing::{debug, error, info, warn};

use crate::{auth, error::IngestError, AppState};

/// Response body for events this system deliberately does not process.
const IGNORED_BODY: &str = "Ignored event type";

/// Ingests a Vapi webhook and persists an end-of-call report as a note.
///
/// Outcomes:
/// - 401 `Unauthorized`: secret header missing or wrong
/// - 200 `Ignored event type`: authenticated, but not an end-of-call report
/// - 200 JSON string naming the storage key: note persisted
/// - 500 `Internal Server Error`: malformed body or any processing fault
pub async fn vapi_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    debug!("Processing webhook request");

    if let Err(e) = auth::authenticate(&headers, &state.config.secret_token) {
        warn!("Unauthorized webhook access attempt");
        return e.into_response();
    }

    let envelope: WebhookEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            error!(error = %e, "Failed to parse webhook body");
            return IngestError::malformed(e.to_string()).into_response();
        },
    };

    if !envelope.message.is_end_of_call_report() {
        info!(
            event_type = envelope.message.event_type.as_deref().unwrap_or("<none>"),
            "Ignoring unrecognized event type"
        );
        return (StatusCode::OK, IGNORED_BODY).into_response();
    }

    let report = CallReport::from(envelope.message);

    // One clock read per request so the key date and the front-matter
    // timestamp always agree.
    let now = state.clock.now_utc();
    let key = note::storage_key(&report.call_id, now.date_naive());
    let rendered = note::render_note(&report, now);

    debug!(call_id = %report.call_id, key = %key, "Rendered call report");

    match state
        .store
        .put_note(key.clone(), Bytes::from(rendered), NOTE_CONTENT_TYPE.to_string())
        .await
    {
        Ok(()) => {
            info!(key = %key, "Successfully saved note");
            (StatusCode::OK, Json(format!("Successfully saved to {key}"))).into_response()
        },
        Err(e) => {
            error!(error = %e, key = %key, "Failed to persist note");
            e.into_response()
        },
    }
}
