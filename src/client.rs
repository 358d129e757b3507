//! NSE device client
//!
//! Owns the HTTP transport to the appliance's XML command endpoint. The
//! command core stays transport-free: this module only moves complete
//! request/response bodies and maps transport failures onto the connection
//! error taxonomy, which is disjoint from the device-error taxonomy
//! produced by [`Response::parse`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nse_xmlapi::{Command, NseClient, NseResult};
//! use nse_xmlapi::commands::CACHE_UPDATE;
//!
//! #[tokio::main]
//! async fn main() -> NseResult<()> {
//!     let mut client = NseClient::new("10.0.0.1").with_auth("admin", "admin");
//!     client.open()?;
//!
//!     let mut cmd = Command::new(&CACHE_UPDATE).arg("00:1A:2B:3C:4D:5E");
//!     let response = client.execute(&mut cmd).await?;
//!     println!("RESULT: {:?}", response.attribute("RESULT"));
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tokio::net::TcpStream;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::constants::{COMMAND_PATH, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, PROBE_INTERVAL_SECS};
use crate::error::{NseError, NseResult};
use crate::response::Response;

/// Client for one NSE device.
///
/// Construction is cheap and infallible; [`NseClient::open`] builds the
/// HTTP client and [`NseClient::execute`] sends commands. The client can
/// be shared behind `&self` for concurrent requests once opened.
#[derive(Debug)]
pub struct NseClient {
    host: String,
    port: u16,
    timeout: Duration,
    auth: Option<(String, String)>,
    http: Option<reqwest::Client>,
}

impl NseClient {
    /// Create a client for the given host with default port and timeout.
    pub fn new(host: impl Into<String>) -> Self {
        NseClient {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth: None,
            http: None,
        }
    }

    /// Use a non-default XML command port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Use a non-default request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Authenticate requests with HTTP basic auth.
    pub fn with_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((user.into(), password.into()));
        self
    }

    /// The configured device host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The configured XML command port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether `open()` has been called and `close()` has not.
    pub fn is_connected(&self) -> bool {
        self.http.is_some()
    }

    /// Full URL of the device's command endpoint.
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, COMMAND_PATH)
    }

    /// Probe whether the device accepts a TCP connection on the command
    /// port, retrying every second until `timeout` elapses.
    ///
    /// Meant to be called prior to [`NseClient::open`]; a `false` result
    /// usually means the device is unreachable or the XML interface is
    /// disabled.
    pub async fn probe(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let interval = Duration::from_secs(PROBE_INTERVAL_SECS);
        loop {
            let attempt = tokio::time::timeout(
                interval,
                TcpStream::connect((self.host.as_str(), self.port)),
            )
            .await;
            if matches!(attempt, Ok(Ok(_))) {
                return true;
            }
            if Instant::now() + interval > deadline {
                warn!(host = %self.host, port = self.port, "probe exhausted");
                return false;
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// Build the HTTP transport using the configured timeout.
    pub fn open(&mut self) -> NseResult<&mut Self> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| NseError::transport(e.to_string()))?;
        self.http = Some(http);
        info!(host = %self.host, port = self.port, "connection opened");
        Ok(self)
    }

    /// Probe first, then open. Probe failure yields [`NseError::Probe`].
    pub async fn open_probed(&mut self, probe_timeout: Duration) -> NseResult<&mut Self> {
        if !self.probe(probe_timeout).await {
            return Err(NseError::Probe {
                host: self.host.clone(),
                port: self.port,
            });
        }
        self.open()
    }

    /// Drop the HTTP transport. Safe to call when not connected.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            info!(host = %self.host, "connection closed");
        }
    }

    /// Serialize the command, POST it to the device, and interpret the
    /// response envelope.
    ///
    /// A `RESULT="ERROR"` envelope surfaces as [`NseError::Device`];
    /// transport failures surface as connection-taxonomy errors.
    pub async fn execute(&self, command: &mut Command) -> NseResult<Response> {
        let http = self.http.as_ref().ok_or_else(|| NseError::NotConnected {
            host: self.host.clone(),
        })?;

        let xml = command.to_xml()?;
        debug!(
            command = command.schema().command,
            bytes = xml.len(),
            "sending command"
        );

        let mut request = http
            .post(self.url())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(xml);
        if let Some((user, password)) = &self.auth {
            request = request.basic_auth(user, Some(password));
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(NseError::transport(format!(
                "device returned HTTP status {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport(e))?;
        debug!(bytes = body.len(), "response received");
        Response::parse(&body)
    }

    fn map_transport(&self, err: reqwest::Error) -> NseError {
        if err.is_timeout() {
            NseError::ConnectTimeout {
                host: self.host.clone(),
            }
        } else if err.is_connect() {
            NseError::ConnectRefused {
                host: self.host.clone(),
            }
        } else {
            NseError::transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CACHE_UPDATE;

    #[test]
    fn test_defaults_and_url() {
        let client = NseClient::new("10.1.2.3");
        assert_eq!(client.port(), DEFAULT_PORT);
        assert_eq!(client.url(), "http://10.1.2.3:1111/usg/command.xml");
        assert!(!client.is_connected());
    }

    #[test]
    fn test_builder_overrides() {
        let client = NseClient::new("nse.local")
            .with_port(8080)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(client.url(), "http://nse.local:8080/usg/command.xml");
    }

    #[test]
    fn test_open_and_close_toggle_connection_state() {
        let mut client = NseClient::new("10.1.2.3");
        client.open().unwrap();
        assert!(client.is_connected());
        client.close();
        assert!(!client.is_connected());
        // close is idempotent
        client.close();
    }

    #[tokio::test]
    async fn test_execute_without_open_is_not_connected() {
        let client = NseClient::new("10.1.2.3");
        let mut cmd = Command::new(&CACHE_UPDATE).arg("001A2B3C4D5E");
        let err = client.execute(&mut cmd).await.unwrap_err();
        assert!(matches!(err, NseError::NotConnected { .. }));
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_probe_gives_up_after_deadline() {
        // Reserved port on localhost; nothing listens there.
        let client = NseClient::new("127.0.0.1").with_port(1);
        assert!(!client.probe(Duration::from_millis(50)).await);
    }
}
