//! Usage-event tracking interface.
//!
//! Commands emit events through [`EventTracker`] without knowing how (or
//! whether) they are delivered. `termfolio-net` provides the real sink.

use serde_json::{Map, Value};

/// Arbitrary JSON payload attached to a usage event.
pub type TrackPayload = Map<String, Value>;

/// Fire-and-forget sink for usage events.
///
/// Implementations must never block the caller on delivery and must never
/// surface delivery failures.
pub trait EventTracker: Send + Sync {
    /// Record `event` with the given payload.
    fn track(&self, event: &str, payload: TrackPayload);
}

/// Build a payload from `(key, value)` string pairs.
pub fn payload<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> TrackPayload {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}
