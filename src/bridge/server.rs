//! Bridge server: accept loop and command dispatch.
//!
//! Listens on the configured loopback TCP endpoint. Each connection
//! carries exactly one exchange: the client sends one JSON request line,
//! the server replies with one JSON response line and closes. There is no
//! session state between connections.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};

use crate::bridge::protocol::{BridgeRequest, BridgeResponse};
use crate::bridge::registry::CommandRegistry;
use crate::config::GlobalConfig;
use crate::runner::run_command;
use crate::{AppError, Result};

/// Immutable state shared by every connection handler.
#[derive(Debug)]
pub struct ServerState {
    /// Parsed global configuration.
    pub config: GlobalConfig,
    /// Alias registry built from the configuration at startup.
    pub registry: CommandRegistry,
}

impl ServerState {
    /// Build server state from configuration, registering every alias.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any configured alias fails
    /// registration.
    pub fn from_config(config: GlobalConfig) -> Result<Self> {
        let registry = CommandRegistry::from_config(&config)?;
        Ok(Self { config, registry })
    }
}

/// Bind the configured endpoint and spawn the accept-loop task.
///
/// Returns the bound address (useful when the configured port is 0) and
/// the task handle.
///
/// # Errors
///
/// Returns `AppError::Config` if the endpoint is invalid or
/// `AppError::Io` if the listener cannot be bound.
pub async fn spawn_bridge_server(
    state: Arc<ServerState>,
    ct: CancellationToken,
) -> Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>)> {
    let addr = state.config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::Io(format!("failed to bind {addr}: {err}")))?;
    let local_addr = listener
        .local_addr()
        .map_err(|err| AppError::Io(format!("failed to resolve bound address: {err}")))?;

    info!(addr = %local_addr, "bridge server listening");

    let handle = tokio::spawn(async move {
        let span = info_span!("bridge_server", addr = %local_addr);
        async move {
            loop {
                tokio::select! {
                    () = ct.cancelled() => {
                        info!("bridge server shutting down");
                        break;
                    }
                    accept_result = listener.accept() => {
                        match accept_result {
                            Ok((stream, peer)) => {
                                let state = Arc::clone(&state);
                                tokio::spawn(
                                    handle_connection(stream, state)
                                        .instrument(info_span!("bridge_conn", %peer)),
                                );
                            }
                            Err(err) => {
                                warn!(%err, "accept failed");
                            }
                        }
                    }
                }
            }
        }
        .instrument(span)
        .await;
    });

    Ok((local_addr, handle))
}

/// Handle one connection: one request line in, one response line out.
async fn handle_connection(stream: TcpStream, state: Arc<ServerState>) {
    let (reader, mut writer) = stream.into_split();
    let mut buf_reader = BufReader::new(reader);
    let mut line = String::new();

    match buf_reader.read_line(&mut line).await {
        Ok(0) => return, // closed without a request
        Ok(_) => {}
        Err(err) => {
            warn!(%err, "request read failed");
            return;
        }
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }

    let response = match serde_json::from_str::<BridgeRequest>(trimmed) {
        Ok(request) => dispatch_command(&request, &state).await,
        Err(err) => BridgeResponse::error(format!("invalid json: {err}")),
    };

    let mut response_line = serde_json::to_string(&response)
        .unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_owned());
    response_line.push('\n');

    if let Err(err) = writer.write_all(response_line.as_bytes()).await {
        warn!(%err, "failed to write response");
    }
    // Connection closes on drop; one exchange per connection.
}

/// Route a request to the built-in handler or the alias registry.
async fn dispatch_command(request: &BridgeRequest, state: &Arc<ServerState>) -> BridgeResponse {
    info!(command = %request.command, "command received");

    if request.command == "about" {
        return BridgeResponse::result(state.config.about_banner.clone());
    }

    let Some(program) = state.registry.lookup(&request.command) else {
        return BridgeResponse::error(format!("unknown command: {}", request.command));
    };

    match run_command(program).await {
        Ok(outcome) => match serde_json::to_value(&outcome) {
            Ok(payload) => BridgeResponse::result(payload),
            Err(err) => BridgeResponse::error(format!("invalid outcome payload: {err}")),
        },
        Err(err) => BridgeResponse::error(err.to_string()),
    }
}
