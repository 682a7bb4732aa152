//! Minimal HTTP/1.1 POST client.
//!
//! Supports plain HTTP over `std::net::TcpStream` and, with the
//! `tls-rustls` feature, HTTPS via rustls. Only the status line of the
//! response is read; telemetry never consumes a response body.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use termfolio_types::error::{Result, TermfolioError};

use crate::telemetry::{PostRequest, Transport};

/// TCP connect timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// TCP read/write timeout.
const IO_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on the response head we are willing to buffer.
const MAX_HEAD_SIZE: usize = 16 * 1024;

/// The parts of a collector URL needed to issue a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// Path plus query, starting with `/`.
    pub target: String,
}

impl Endpoint {
    /// Parse an absolute `http://` or `https://` URL.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| TermfolioError::Network(format!("not an absolute URL: {url}")))?;
        let scheme = scheme.to_ascii_lowercase();
        let default_port = match scheme.as_str() {
            "http" => 80,
            "https" => 443,
            other => {
                return Err(TermfolioError::Network(format!(
                    "unsupported scheme: {other}"
                )));
            },
        };

        // Fragments never go on the wire.
        let rest = rest.split('#').next().unwrap_or("");
        let (authority, target) = match rest.find(['/', '?']) {
            Some(i) if rest[i..].starts_with('?') => (&rest[..i], format!("/{}", &rest[i..])),
            Some(i) => (&rest[..i], rest[i..].to_string()),
            None => (rest, "/".to_string()),
        };

        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) => match p.parse::<u16>() {
                Ok(port) => (h, port),
                Err(_) => (authority, default_port),
            },
            None => (authority, default_port),
        };
        if host.is_empty() {
            return Err(TermfolioError::Network(format!("missing host in {url}")));
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
            target,
        })
    }

    pub fn is_https(&self) -> bool {
        self.scheme == "https"
    }

    /// Value for the `Host` header (port omitted when default).
    fn host_header(&self) -> String {
        let default_port = if self.is_https() { 443 } else { 80 };
        if self.port == default_port {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// [`Transport`] that speaks HTTP/1.1 directly over TCP.
pub struct HttpTransport {
    #[cfg(feature = "tls-rustls")]
    tls: crate::tls_rustls::TlsConnector,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "tls-rustls")]
            tls: crate::tls_rustls::TlsConnector::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn post(&self, request: &PostRequest) -> Result<u16> {
        let endpoint = Endpoint::parse(&request.url)?;
        let stream = tcp_connect(&endpoint.host, endpoint.port)?;
        log::debug!(
            "POST {}:{}{} ({} bytes, keepalive={})",
            endpoint.host,
            endpoint.port,
            endpoint.target,
            request.body.len(),
            request.keepalive
        );

        if endpoint.is_https() {
            self.post_tls(stream, &endpoint, request)
        } else {
            let mut stream = stream;
            send_request(&mut stream, &endpoint, request)?;
            read_status(&mut stream)
        }
    }
}

impl HttpTransport {
    #[cfg(feature = "tls-rustls")]
    fn post_tls(&self, stream: TcpStream, endpoint: &Endpoint, request: &PostRequest) -> Result<u16> {
        let mut tls_stream = self.tls.connect(stream, &endpoint.host)?;
        send_request(&mut tls_stream, endpoint, request)?;
        read_status(&mut tls_stream)
    }

    #[cfg(not(feature = "tls-rustls"))]
    fn post_tls(&self, _stream: TcpStream, endpoint: &Endpoint, _request: &PostRequest) -> Result<u16> {
        Err(TermfolioError::Network(format!(
            "HTTPS to {} requires the tls-rustls feature",
            endpoint.host
        )))
    }
}

/// Open a TCP connection with connect and I/O timeouts.
fn tcp_connect(host: &str, port: u16) -> Result<TcpStream> {
    use std::net::ToSocketAddrs;

    let addr = (host, port)
        .to_socket_addrs()
        .map_err(|e| TermfolioError::Network(format!("DNS resolution failed: {e}")))?
        .next()
        .ok_or_else(|| TermfolioError::Network(format!("no addresses for {host}:{port}")))?;

    let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
        .map_err(|e| TermfolioError::Network(format!("TCP connect failed: {e}")))?;

    stream
        .set_read_timeout(Some(IO_TIMEOUT))
        .and_then(|()| stream.set_write_timeout(Some(IO_TIMEOUT)))
        .map_err(|e| TermfolioError::Network(format!("set timeout: {e}")))?;

    Ok(stream)
}

/// Write the request head and body.
fn send_request(stream: &mut impl Write, endpoint: &Endpoint, request: &PostRequest) -> Result<()> {
    let mut head = format!(
        "POST {} HTTP/1.1\r\n\
         Host: {}\r\n\
         User-Agent: termfolio/{}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n",
        endpoint.target,
        endpoint.host_header(),
        env!("CARGO_PKG_VERSION"),
        request.body.len(),
    );
    for (name, value) in &request.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");

    write_parts(stream, head.as_bytes(), &request.body)
        .map_err(|e| TermfolioError::Network(format!("send request: {e}")))
}

fn write_parts(stream: &mut impl Write, head: &[u8], body: &[u8]) -> io::Result<()> {
    stream.write_all(head)?;
    stream.write_all(body)?;
    stream.flush()
}

/// Read until the status line is complete and return the status code.
fn read_status(stream: &mut impl Read) -> Result<u16> {
    let mut buf = Vec::with_capacity(512);
    let mut chunk = [0u8; 512];
    loop {
        if let Some(end) = find_subsequence(&buf, b"\r\n") {
            let line = std::str::from_utf8(&buf[..end])
                .map_err(|_| TermfolioError::Network("non-UTF-8 status line".to_string()))?;
            return parse_status_line(line);
        }
        match stream.read(&mut chunk) {
            Ok(0) => {
                return Err(TermfolioError::Network(
                    "connection closed before status line".to_string(),
                ));
            },
            Ok(n) => {
                if buf.len() + n > MAX_HEAD_SIZE {
                    return Err(TermfolioError::Network("response head too large".to_string()));
                }
                buf.extend_from_slice(&chunk[..n]);
            },
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
            Err(e) => return Err(TermfolioError::Network(format!("read response: {e}"))),
        }
    }
}

/// Parse the HTTP status code from the status line.
fn parse_status_line(line: &str) -> Result<u16> {
    // Expected: "HTTP/1.x NNN ..."
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or("");
    if !version.starts_with("HTTP/") {
        return Err(TermfolioError::Network(format!("bad status line: {line}")));
    }
    parts
        .next()
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| TermfolioError::Network(format!("bad status code in: {line}")))
}

/// Find the position of a byte subsequence in a slice.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
