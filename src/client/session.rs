//! Client session
//!
//! Owns the one connection of the process. The greeting goes out when the
//! handshake completes and every inbound text message is written to the log
//! sink. Connection failures are only visible as debug-level tracing.

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, Message},
    WebSocketStream,
};
use tracing::debug;

use super::config::{ClientConfig, ConfigError};
use super::sink::{message_line, LogSink, SENDING_LINE};

/// Errors that can occur during a client session
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("Session already started (connection is {0:?})")]
    AlreadyStarted(ConnectionState),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Lifecycle of the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake in progress
    Connecting,
    /// Handshake complete, messages flow
    Open,
    /// The peer started the closing handshake
    Closing,
    /// Closed by either peer, or never opened
    Closed,
}

/// The logical link to the remote endpoint
#[derive(Debug, Clone)]
pub struct Connection {
    address: String,
    state: ConnectionState,
}

impl Connection {
    fn new(address: String) -> Self {
        Self {
            address,
            state: ConnectionState::Connecting,
        }
    }

    /// Target address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        self.state
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The handshake never completed
    Unreachable,
    /// The peer closed the connection or the stream ended
    Closed,
    /// A transport error ended an open connection
    Failed,
}

/// A single client connection and its two event handlers
pub struct ClientSession<S> {
    config: ClientConfig,
    connection: Connection,
    sink: S,
    greeted: bool,
}

impl<S: LogSink> ClientSession<S> {
    /// Create a session, rejecting addresses that are not WebSocket URIs
    pub fn new(config: ClientConfig, sink: S) -> ClientResult<Self> {
        config.validate()?;
        let connection = Connection::new(config.address.clone());
        Ok(Self {
            config,
            connection,
            sink,
            greeted: false,
        })
    }

    /// The connection owned by this session
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The log sink the handlers write to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Connect, greet the server and log its messages until the connection ends
    ///
    /// Connection and transport errors end the session quietly. The only
    /// error is calling this again on a session whose connection already started.
    pub async fn run(&mut self) -> ClientResult<SessionOutcome> {
        if self.connection.state != ConnectionState::Connecting {
            return Err(ClientError::AlreadyStarted(self.connection.state));
        }

        debug!("Connecting to {}", self.connection.address);

        let mut ws_stream = match connect_async(self.config.address.as_str()).await {
            Ok((ws_stream, response)) => {
                debug!(
                    "Handshake with {} complete ({})",
                    self.connection.address,
                    response.status()
                );
                ws_stream
            }
            Err(e) => {
                debug!("Connection to {} failed: {}", self.connection.address, e);
                self.connection.state = ConnectionState::Closed;
                return Ok(SessionOutcome::Unreachable);
            }
        };

        let outcome = match self.converse(&mut ws_stream).await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("Connection to {} lost: {}", self.connection.address, e);
                SessionOutcome::Failed
            }
        };

        self.connection.state = ConnectionState::Closed;
        Ok(outcome)
    }

    /// Drive an open connection
    async fn converse<T>(
        &mut self,
        ws_stream: &mut WebSocketStream<T>,
    ) -> ClientResult<SessionOutcome>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        if let Some(greeting) = self.on_open() {
            ws_stream.send(greeting).await?;
        }

        while let Some(msg) = ws_stream.next().await {
            match msg? {
                Message::Text(text) => self.on_message(&text),
                Message::Binary(data) => {
                    debug!("Ignoring binary message ({} bytes)", data.len());
                }
                // Pings are answered by tungstenite itself
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
                Message::Close(frame) => {
                    debug!("Server requested close: {:?}", frame);
                    self.connection.state = ConnectionState::Closing;
                }
            }
        }

        Ok(SessionOutcome::Closed)
    }

    /// Handshake completed; returns the greeting the first time only
    fn on_open(&mut self) -> Option<Message> {
        if self.greeted {
            return None;
        }
        self.greeted = true;
        self.connection.state = ConnectionState::Open;

        self.sink.line(SENDING_LINE);
        Some(Message::Text(self.config.greeting.clone()))
    }

    /// A text message arrived
    fn on_message(&mut self, payload: &str) {
        self.sink.line(&message_line(payload));
    }
}

impl<S> ClientSession<S> {
    /// Consume the session and hand back its sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
