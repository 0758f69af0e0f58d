//! Markdown note rendering and storage-key derivation.
//!
//! Rendering is byte-deterministic given the same report and timestamp, and
//! the storage key is a pure function of the call id and the calendar date.
//! Two reports sharing a call-id prefix on the same day map to the same key;
//! the store's last-writer-wins semantics resolve the collision.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::CallReport;

/// Content type declared when persisting a rendered note.
pub const NOTE_CONTENT_TYPE: &str = "text/markdown";

/// Key prefix under which all notes are filed.
const KEY_PREFIX: &str = "inbox";

/// How many characters of the call id participate in the key.
const CALL_ID_PREFIX_LEN: usize = 8;

/// Derives the storage key for a call's note.
///
/// Shape: `inbox/Interview-<YYYY-MM-DD>-<id8>.md`, where `<id8>` is the
/// first eight characters of the call id. Characters, not bytes: a
/// multi-byte call id must never be split mid code point.
pub fn storage_key(call_id: &str, date: NaiveDate) -> String {
    let id_prefix: String = call_id.chars().take(CALL_ID_PREFIX_LEN).collect();
    format!("{KEY_PREFIX}/Interview-{}-{id_prefix}.md", date.format("%Y-%m-%d"))
}

/// Renders a call report into the Markdown note document.
///
/// Layout is fixed: YAML front matter (id, date+time, category, tags,
/// recording), a heading, a summary section, then a transcript section.
/// Deterministic: identical inputs produce identical bytes.
pub fn render_note(report: &CallReport, at: DateTime<Utc>) -> String {
    let date = at.format("%Y-%m-%d");
    let time = at.format("%H:%M");

    format!(
        "---\n\
         id: {id}\n\
         date: {date} {time}\n\
         type: voice-note\n\
         tags: [interview, inbox, ghostwriter]\n\
         recording: {recording}\n\
         ---\n\
         \n\
         # Auto-Generated Interview ({date})\n\
         \n\
         ## Summary\n\
         {summary}\n\
         \n\
         ## Transcript\n\
         {transcript}\n",
        id = report.call_id,
        recording = report.recording_url,
        summary = report.summary,
        transcript = report.transcript,
    )
}
