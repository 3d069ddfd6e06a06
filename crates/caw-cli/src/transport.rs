//! Connection to the Faz service.
//!
//! [`FazService`] is the seam the dispatcher calls through. [`FazConnection`]
//! implements it over a WebSocket that carries one binary [`FazFrame`] per
//! call and one per reply.
//!
//! # Example
//!
//! ```rust,no_run
//! use caw_cli::transport::FazConnection;
//!
//! # async fn example() -> Result<(), caw_cli::CliError> {
//! let connection = FazConnection::connect("ws://localhost:50000").await?;
//! connection.close().await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use caw_proto::faz::methods;
use caw_proto::{
    EventReply, EventRequest, FazFrame, HookReply, HookRequest, UnhookReply, UnhookRequest,
};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, trace};

use crate::error::CliError;

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The three calls the Faz service exposes.
pub trait FazService: Send {
    /// Bind an event type to a handler name.
    fn hook(
        &mut self,
        request: HookRequest,
    ) -> impl Future<Output = Result<HookReply, CliError>> + Send;

    /// Remove the binding for an event type.
    fn unhook(
        &mut self,
        request: UnhookRequest,
    ) -> impl Future<Output = Result<UnhookReply, CliError>> + Send;

    /// Run the handler bound to the envelope's event type.
    fn event(
        &mut self,
        request: EventRequest,
    ) -> impl Future<Output = Result<EventReply, CliError>> + Send;
}

/// WebSocket connection to a Faz service.
pub struct FazConnection {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    next_call_id: u64,
}

impl std::fmt::Debug for FazConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FazConnection")
            .field("next_call_id", &self.next_call_id)
            .finish_non_exhaustive()
    }
}

impl FazConnection {
    /// Connect to the Faz service at the given URL.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is invalid (must start with `ws://` or `wss://`)
    /// - Connection fails or times out
    pub async fn connect(url: &str) -> Result<Self, CliError> {
        Self::connect_with_timeout(url, DEFAULT_CONNECT_TIMEOUT).await
    }

    /// Connect with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the connection fails.
    pub async fn connect_with_timeout(
        url: &str,
        connect_timeout: Duration,
    ) -> Result<Self, CliError> {
        if !url.starts_with("ws://") && !url.starts_with("wss://") {
            return Err(CliError::Config(format!(
                "invalid faz URL: {url}, must start with ws:// or wss://"
            )));
        }

        debug!(url = %url, "Connecting to faz");

        let (ws, _response) = timeout(connect_timeout, connect_async(url))
            .await
            .map_err(|_| CliError::Timeout("connection timed out".into()))?
            .map_err(|e| CliError::Connection(e.to_string()))?;

        debug!("Faz connection established");
        Ok(Self { ws, next_call_id: 0 })
    }

    /// Close the connection gracefully.
    ///
    /// # Errors
    ///
    /// Returns an error if the close handshake cannot be sent.
    pub async fn close(mut self) -> Result<(), CliError> {
        self.ws
            .close(None)
            .await
            .map_err(|e| CliError::Connection(e.to_string()))
    }

    /// Send one call and wait for its reply.
    ///
    /// Replies to earlier calls (ones abandoned at their deadline) are
    /// skipped by call id.
    async fn call<Req, Rep>(&mut self, method: u32, request: &Req) -> Result<Rep, CliError>
    where
        Req: prost::Message,
        Rep: prost::Message + Default,
    {
        self.next_call_id += 1;
        let call_id = self.next_call_id;
        let frame = FazFrame::call(method, call_id, request);

        trace!(method, call_id, bytes = request.encoded_len(), "Sending call");
        self.ws.send(Message::Binary(frame.encode_wire())).await?;

        loop {
            let message = self
                .ws
                .next()
                .await
                .ok_or_else(|| CliError::Connection("connection closed".into()))??;

            let bytes = match message {
                Message::Binary(bytes) => bytes,
                Message::Ping(_) | Message::Pong(_) => continue,
                Message::Close(_) => {
                    return Err(CliError::Connection("connection closed by server".into()));
                }
                _ => return Err(CliError::Protocol("unexpected message type".into())),
            };

            let reply =
                FazFrame::decode_wire(&bytes).map_err(|e| CliError::Protocol(e.to_string()))?;
            if reply.call_id != call_id {
                debug!(stale = reply.call_id, expected = call_id, "Dropping stale reply");
                continue;
            }
            if !reply.is_ok() {
                return Err(CliError::Remote {
                    code: reply.status,
                    message: reply.message,
                });
            }

            trace!(method, call_id, "Received reply");
            return reply
                .body_as::<Rep>()
                .map_err(|e| CliError::Protocol(e.to_string()));
        }
    }
}

impl FazService for FazConnection {
    async fn hook(&mut self, request: HookRequest) -> Result<HookReply, CliError> {
        self.call(methods::HOOK, &request).await
    }

    async fn unhook(&mut self, request: UnhookRequest) -> Result<UnhookReply, CliError> {
        self.call(methods::UNHOOK, &request).await
    }

    async fn event(&mut self, request: EventRequest) -> Result<EventReply, CliError> {
        self.call(methods::EVENT, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_url_rejected() {
        let result = FazConnection::connect("http://localhost:50000").await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid faz URL"));
    }

    #[tokio::test]
    async fn connection_refused_is_reported() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let result =
            FazConnection::connect_with_timeout(&format!("ws://{addr}"), Duration::from_secs(2))
                .await;
        assert!(matches!(result, Err(CliError::Connection(_))));
    }
}
