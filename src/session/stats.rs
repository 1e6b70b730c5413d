use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Diagnostics for one press-to-playback session.
///
/// Counters are purely observational; every session starts a fresh record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Unique id for this session.
    pub session_id: String,

    /// When the press was confirmed.
    pub started_at: DateTime<Utc>,

    /// Total bytes appended to the store during capture.
    pub captured_bytes: usize,

    /// Total bytes pushed to the speaker during playback (beep excluded).
    pub played_bytes: usize,

    /// True when a store failure cut the capture short. The session still
    /// played back whatever was stored before the failure.
    pub capture_truncated: bool,

    /// True when the store could not switch to reading and playback was
    /// skipped entirely.
    pub playback_skipped: bool,
}

impl SessionStats {
    pub fn begin() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            started_at: Utc::now(),
            captured_bytes: 0,
            played_bytes: 0,
            capture_truncated: false,
            playback_skipped: false,
        }
    }
}
