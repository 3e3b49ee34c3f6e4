//! Synchronous bridge client.
//!
//! One TCP connection per call: connect, send a single JSON request line,
//! read the reply to EOF, decode. No retries, no connection reuse, no
//! configured timeouts beyond platform defaults. The stream is dropped on
//! every exit path, success or failure.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use tracing::debug;

use crate::bridge::protocol::{BridgeRequest, BridgeResponse};
use crate::{AppError, Result};

/// Blocking client for a bridge endpoint.
#[derive(Debug, Clone, Copy)]
pub struct BridgeClient {
    addr: SocketAddr,
}

impl Default for BridgeClient {
    /// Client for the default loopback endpoint, 127.0.0.1:50505.
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 50505)))
    }
}

impl BridgeClient {
    /// Create a client targeting the given endpoint.
    #[must_use]
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// The endpoint this client targets.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Deliver one command and block for the full response.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Bridge` on any connect, transmit, or decode
    /// failure, including responses that carry neither `result` nor
    /// `error`.
    pub fn call(&self, command: &str) -> Result<BridgeResponse> {
        let mut stream = TcpStream::connect(self.addr).map_err(|err| {
            AppError::Bridge(format!("failed to connect to {}: {err}", self.addr))
        })?;

        // Send request as a single JSON line.
        let mut request_line = serde_json::to_string(&BridgeRequest::new(command))?;
        request_line.push('\n');
        stream
            .write_all(request_line.as_bytes())
            .and_then(|()| stream.flush())
            .map_err(|err| AppError::Bridge(format!("failed to send request: {err}")))?;

        // Signal end-of-request so servers that read to EOF also proceed.
        if let Err(err) = stream.shutdown(Shutdown::Write) {
            debug!(%err, "write-half shutdown failed; continuing to read");
        }

        // The server replies with one line and closes; read to EOF.
        let mut body = String::new();
        stream
            .read_to_string(&mut body)
            .map_err(|err| AppError::Bridge(format!("failed to read response: {err}")))?;

        debug!(command, addr = %self.addr, "bridge round trip complete");
        BridgeResponse::from_json(&body)
    }

    /// Deliver one command and report the outcome on stdout/stderr.
    ///
    /// This is the degrade-to-diagnostic boundary: the `result` payload or
    /// `error` message is printed on success, and every transport failure
    /// is printed as a human-readable line. Nothing propagates past this
    /// call and nothing is retried.
    pub fn report(&self, command: &str) {
        match self.call(command) {
            Ok(response) if response.is_result() => {
                println!("[bridge] {}", response.summary());
            }
            Ok(response) => {
                eprintln!("[bridge] error: {}", response.summary());
            }
            Err(err) => {
                eprintln!("[bridge] unreachable: {err}");
            }
        }
    }
}
