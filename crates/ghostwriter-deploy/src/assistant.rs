//! Desired-state configuration for the Ghostwriter assistant.
//!
//! [`AssistantConfig::build`] is the single source of truth for what the
//! remote assistant should look like. It is pure and total: the same
//! callback URL always produces the same document, and the reconciler
//! overwrites the remote resource with it wholesale rather than diffing.

use ghostwriter_core::END_OF_CALL_REPORT;
use serde::Serialize;

/// Display name of the assistant; the reconciler's sole lookup key.
pub const ASSISTANT_NAME: &str = "Ghostwriter";

/// System instruction opening every conversation.
pub const SYSTEM_PROMPT: &str = "You are a technical ghostwriter for Elijah. \
    Ask ONE short question at a time. Probe for technical details. \
    When Elijah says 'That's it', say 'Documentation saved' and end the call.";

const MODEL_PROVIDER: &str = "openai";
const MODEL_NAME: &str = "gpt-4o-mini";
const TRANSCRIBER_PROVIDER: &str = "deepgram";
const TRANSCRIBER_MODEL: &str = "nova-2";
const VOICE_PROVIDER: &str = "openai";
const VOICE_NAME: &str = "alloy";
const VOICE_SPEED: f64 = 1.1;
const SILENCE_TIMEOUT_SECONDS: f64 = 0.6;

/// Complete desired-state document for the remote assistant.
///
/// Serializes to the Vapi wire shape (camelCase). Compared against remote
/// resources only by `name`, never by deep equality.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantConfig {
    /// Display name, fixed to [`ASSISTANT_NAME`].
    pub name: String,
    /// Conversation model settings.
    pub model: ModelConfig,
    /// Speech-to-text settings.
    pub transcriber: TranscriberConfig,
    /// Seconds of silence before the assistant responds.
    pub silence_timeout_seconds: f64,
    /// Text-to-speech settings.
    pub voice: VoiceConfig,
    /// Callback URL invoked by the remote system, verbatim.
    pub server_url: String,
    /// Event types the remote system reports to the callback.
    pub server_messages: Vec<String>,
}

/// Conversation model settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// Model provider identifier.
    pub provider: String,
    /// Model name at that provider.
    pub model: String,
    /// Opening instruction messages.
    pub messages: Vec<InstructionMessage>,
}

/// A single instruction message in the model configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionMessage {
    /// Message role, e.g. `system`.
    pub role: String,
    /// Message content.
    pub content: String,
}

/// Speech-to-text settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriberConfig {
    /// Transcription provider identifier.
    pub provider: String,
    /// Transcription model name.
    pub model: String,
    /// Whether the provider applies smart formatting.
    pub smart_format: bool,
}

/// Text-to-speech settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// Voice provider identifier.
    pub provider: String,
    /// Voice name at that provider.
    pub voice: String,
    /// Playback speed multiplier.
    pub speed: f64,
}

impl AssistantConfig {
    /// Builds the desired assistant configuration for a callback URL.
    ///
    /// Pure and deterministic; the URL is embedded verbatim, without
    /// normalization.
    pub fn build(server_url: impl Into<String>) -> Self {
        Self {
            name: ASSISTANT_NAME.to_string(),
            model: ModelConfig {
                provider: MODEL_PROVIDER.to_string(),
                model: MODEL_NAME.to_string(),
                messages: vec![InstructionMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                }],
            },
            transcriber: TranscriberConfig {
                provider: TRANSCRIBER_PROVIDER.to_string(),
                model: TRANSCRIBER_MODEL.to_string(),
                smart_format: false,
            },
            silence_timeout_seconds: SILENCE_TIMEOUT_SECONDS,
            voice: VoiceConfig {
                provider: VOICE_PROVIDER.to_string(),
                voice: VOICE_NAME.to_string(),
                speed: VOICE_SPEED,
            },
            server_url: server_url.into(),
            server_messages: vec![END_OF_CALL_REPORT.to_string()],
        }
    }
}
