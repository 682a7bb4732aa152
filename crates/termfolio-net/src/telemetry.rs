//! Best-effort delivery of usage events.
//!
//! Two tiers, in order: a host-provided [`Beacon`] (unload-safe, no custom
//! headers, boolean result) and, if that is missing, declines, or fails, a
//! keepalive POST through a [`Transport`] carrying the bearer credential.
//! Nothing here ever returns an error to the caller.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use termfolio_types::config::TelemetryConfig;
use termfolio_types::error::Result;
use termfolio_types::track::{EventTracker, TrackPayload};

const CONTENT_TYPE_JSON: &str = "application/json";

/// A usage event as it goes on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct TrackEvent {
    #[serde(rename = "event")]
    pub name: String,
    pub payload: TrackPayload,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
}

impl TrackEvent {
    /// Build an event stamped with the current time.
    pub fn new(name: &str, payload: TrackPayload) -> Self {
        Self {
            name: name.to_string(),
            payload,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Host-provided, unload-safe, fire-and-forget delivery primitive.
///
/// Cannot carry custom headers. `Ok(false)` means the host declined to
/// queue the payload.
pub trait Beacon: Send + Sync {
    fn send_beacon(&self, url: &str, content_type: &str, body: &[u8]) -> Result<bool>;
}

/// An outbound POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// The request may outlive the session that issued it.
    pub keepalive: bool,
}

impl PostRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Ordinary request path. Returns the HTTP status code.
pub trait Transport: Send + Sync {
    fn post(&self, request: &PostRequest) -> Result<u16>;
}

/// How a single send ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Telemetry is switched off; nothing was attempted.
    Disabled,
    /// The beacon accepted the payload.
    Beacon,
    /// The fallback request completed with this status (any status counts).
    Fallback { status: u16 },
    /// Every tier failed; logged and dropped.
    Dropped,
}

struct SinkInner {
    enabled: bool,
    endpoint: String,
    token: String,
    beacon: Option<Box<dyn Beacon>>,
    transport: Box<dyn Transport>,
}

impl SinkInner {
    fn deliver(&self, event: &TrackEvent) -> Delivery {
        if !self.enabled {
            return Delivery::Disabled;
        }

        let body = match event.to_json() {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Tracking failed: cannot encode '{}': {e}", event.name);
                return Delivery::Dropped;
            },
        };

        if let Some(beacon) = &self.beacon {
            match beacon.send_beacon(&self.endpoint, CONTENT_TYPE_JSON, &body) {
                Ok(true) => return Delivery::Beacon,
                Ok(false) => log::debug!("beacon declined '{}', falling back", event.name),
                Err(e) => log::debug!("beacon failed for '{}': {e}, falling back", event.name),
            }
        }

        let request = PostRequest {
            url: self.endpoint.clone(),
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
                ("Authorization".to_string(), format!("Bearer {}", self.token)),
            ],
            body,
            keepalive: true,
        };
        match self.transport.post(&request) {
            Ok(status) => {
                if !(200..300).contains(&status) {
                    log::debug!("collector answered {status} for '{}'", event.name);
                }
                Delivery::Fallback { status }
            },
            Err(e) => {
                log::warn!("Tracking failed for '{}': {e}", event.name);
                Delivery::Dropped
            },
        }
    }
}

/// Sends usage events to the collector.
pub struct TelemetrySink {
    inner: Arc<SinkInner>,
    pending: Mutex<Vec<JoinHandle<Delivery>>>,
}

impl TelemetrySink {
    pub fn new(
        config: &TelemetryConfig,
        beacon: Option<Box<dyn Beacon>>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            inner: Arc::new(SinkInner {
                enabled: config.enabled,
                endpoint: config.endpoint.clone(),
                token: config.token.clone(),
                beacon,
                transport,
            }),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled
    }

    /// Attempt delivery on the calling thread and report how it ended.
    pub fn send(&self, event: &str, payload: TrackPayload) -> Delivery {
        self.inner.deliver(&TrackEvent::new(event, payload))
    }

    /// Attempt delivery on a detached worker thread.
    ///
    /// The event is timestamped now. The caller never waits; use
    /// [`flush`](Self::flush) at shutdown to give in-flight sends a chance.
    pub fn dispatch(&self, event: &str, payload: TrackPayload) {
        if !self.inner.enabled {
            return;
        }
        let event = TrackEvent::new(event, payload);
        let inner = Arc::clone(&self.inner);
        let spawned = thread::Builder::new()
            .name("termfolio-telemetry".to_string())
            .spawn(move || inner.deliver(&event));

        match spawned {
            Ok(handle) => {
                let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
                pending.retain(|h| !h.is_finished());
                pending.push(handle);
            },
            Err(e) => log::warn!("Tracking failed: cannot spawn worker: {e}"),
        }
    }

    /// Wait up to `timeout` for dispatched sends to settle.
    ///
    /// Returns how many were still in flight when the timeout expired;
    /// those keep running detached.
    pub fn flush(&self, timeout: Duration) -> usize {
        let handles = std::mem::take(&mut *self.pending.lock().unwrap_or_else(|e| e.into_inner()));
        let deadline = Instant::now() + timeout;
        while handles.iter().any(|h| !h.is_finished()) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }

        let mut in_flight = 0;
        for handle in handles {
            if !handle.is_finished() {
                in_flight += 1;
                continue;
            }
            match handle.join() {
                Ok(outcome) => log::debug!("telemetry delivery: {outcome:?}"),
                Err(_) => log::warn!("Tracking failed: worker panicked"),
            }
        }
        if in_flight > 0 {
            log::info!("{in_flight} telemetry deliveries still in flight at shutdown");
        }
        in_flight
    }
}

impl EventTracker for TelemetrySink {
    fn track(&self, event: &str, payload: TrackPayload) {
        self.dispatch(event, payload);
    }
}
