//! Webhook payload model and call-report extraction.
//!
//! The inbound body is a Vapi server message envelope. Every field is
//! optional on the wire; extraction into a [`CallReport`] substitutes the
//! documented defaults so downstream rendering never deals with absence.

use serde::Deserialize;

/// The one event type this system processes. Everything else is ignored.
pub const END_OF_CALL_REPORT: &str = "end-of-call-report";

/// Default call identifier when the payload carries none.
pub const DEFAULT_CALL_ID: &str = "unknown-id";

/// Default transcript text when the payload carries none.
pub const DEFAULT_TRANSCRIPT: &str = "No transcript provided.";

/// Default summary text when the payload carries none.
pub const DEFAULT_SUMMARY: &str = "No summary provided.";

/// Top-level webhook body: `{ "message": { ... } }`.
///
/// A body without a `message` object deserializes to an empty message, which
/// then fails the event-type filter rather than the parse stage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEnvelope {
    /// The server message payload.
    #[serde(default)]
    pub message: WebhookMessage,
}

/// The server message inside the envelope.
///
/// Unknown fields are ignored; Vapi sends far more than we consume.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookMessage {
    /// Declared event type, e.g. `end-of-call-report`.
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    /// Reference to the call this message describes.
    #[serde(default)]
    pub call: Option<CallRef>,
    /// Full conversation transcript.
    #[serde(default)]
    pub transcript: Option<String>,
    /// Model-generated call summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Location of the call recording, when one was produced.
    #[serde(rename = "recordingUrl", default)]
    pub recording_url: Option<String>,
}

impl WebhookMessage {
    /// Whether this message declares the one event type we process.
    pub fn is_end_of_call_report(&self) -> bool {
        self.event_type.as_deref() == Some(END_OF_CALL_REPORT)
    }
}

/// Call reference carried inside the message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallRef {
    /// Opaque call identifier assigned by Vapi.
    #[serde(default)]
    pub id: Option<String>,
}

/// One completed call, extracted from the webhook with defaults applied.
///
/// Transient: exists only for the duration of one webhook invocation. The
/// defaults are part of the external contract, not placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallReport {
    /// Opaque call identifier, or [`DEFAULT_CALL_ID`].
    pub call_id: String,
    /// Free-text transcript, or [`DEFAULT_TRANSCRIPT`].
    pub transcript: String,
    /// Free-text summary, or [`DEFAULT_SUMMARY`].
    pub summary: String,
    /// Recording URL, or empty.
    pub recording_url: String,
}

impl From<WebhookMessage> for CallReport {
    fn from(message: WebhookMessage) -> Self {
        Self {
            call_id: message
                .call
                .and_then(|c| c.id)
                .unwrap_or_else(|| DEFAULT_CALL_ID.to_string()),
            transcript: message
                .transcript
                .unwrap_or_else(|| DEFAULT_TRANSCRIPT.to_string()),
            summary: message.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            recording_url: message.recording_url.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_payload_extracts_all_fields() {
        let body = serde_json::json!({
            "message": {
                "type": "end-of-call-report",
                "call": { "id": "call_42" },
                "transcript": "Hello there",
                "summary": "Short call",
                "recordingUrl": "https://rec.example/42.mp3"
            }
        });

        let envelope: WebhookEnvelope = serde_json::from_value(body).unwrap();
        assert!(envelope.message.is_end_of_call_report());

        let report = CallReport::from(envelope.message);
        assert_eq!(report.call_id, "call_42");
        assert_eq!(report.transcript, "Hello there");
        assert_eq!(report.summary, "Short call");
        assert_eq!(report.recording_url, "https://rec.example/42.mp3");
    }

    #[test]
    fn missing_fields_substitute_documented_defaults() {
        let body = serde_json::json!({
            "message": { "type": "end-of-call-report" }
        });

        let envelope: WebhookEnvelope = serde_json::from_value(body).unwrap();
        let report = CallReport::from(envelope.message);

        assert_eq!(report.call_id, "unknown-id");
        assert_eq!(report.transcript, "No transcript provided.");
        assert_eq!(report.summary, "No summary provided.");
        assert_eq!(report.recording_url, "");
    }

    #[test]
    fn empty_body_is_not_an_end_of_call_report() {
        let envelope: WebhookEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!envelope.message.is_end_of_call_report());
    }

    #[test]
    fn other_event_types_fail_the_filter() {
        let body = serde_json::json!({
            "message": { "type": "status-update", "call": { "id": "call_1" } }
        });

        let envelope: WebhookEnvelope = serde_json::from_value(body).unwrap();
        assert!(!envelope.message.is_end_of_call_report());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = serde_json::json!({
            "message": {
                "type": "end-of-call-report",
                "call": { "id": "call_7", "orgId": "org_1" },
                "costBreakdown": { "total": 0.12 }
            }
        });

        let envelope: WebhookEnvelope = serde_json::from_value(body).unwrap();
        assert_eq!(CallReport::from(envelope.message).call_id, "call_7");
    }
}
