//! Networking: telemetry sink, HTTP POST transport, and optional TLS.

mod http;
pub mod telemetry;
#[cfg(feature = "tls-rustls")]
pub mod tls_rustls;

pub use http::{Endpoint, HttpTransport};
pub use telemetry::{Beacon, Delivery, PostRequest, TelemetrySink, TrackEvent, Transport};
#[cfg(feature = "tls-rustls")]
pub use tls_rustls::TlsConnector;
