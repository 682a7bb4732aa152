//! HTTPS support backed by rustls + ring.
//!
//! Enabled by the `tls-rustls` feature. The desktop app turns it on so the
//! fallback request can reach an `https://` collector.

use std::net::TcpStream;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, StreamOwned};

use termfolio_types::error::{Result, TermfolioError};

/// Shared, reusable TLS client configuration (one per transport).
pub struct TlsConnector {
    config: Arc<ClientConfig>,
}

impl TlsConnector {
    /// Build a connector that trusts Mozilla's root CA bundle.
    pub fn new() -> Self {
        let root_store =
            rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Self {
            config: Arc::new(config),
        }
    }

    /// Wrap an established TCP stream in a client TLS session.
    ///
    /// rustls is lazy: the handshake runs on the first read or write.
    pub fn connect(
        &self,
        stream: TcpStream,
        server_name: &str,
    ) -> Result<StreamOwned<ClientConnection, TcpStream>> {
        let sni = ServerName::try_from(server_name.to_owned())
            .map_err(|e| TermfolioError::Network(format!("invalid server name: {e}")))?;

        let conn = ClientConnection::new(Arc::clone(&self.config), sni)
            .map_err(|e| TermfolioError::Network(format!("TLS init: {e}")))?;

        Ok(StreamOwned::new(conn, stream))
    }
}

impl Default for TlsConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn rejects_invalid_server_name() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let stream = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let err = TlsConnector::new().connect(stream, "not a hostname!").unwrap_err();
        assert!(matches!(err, TermfolioError::Network(_)));
    }

    #[test]
    fn accepts_dns_name() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let stream = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        assert!(TlsConnector::default().connect(stream, "example.com").is_ok());
    }
}
