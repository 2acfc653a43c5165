/// Errors that can occur on the driver transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to establish the websocket connection to the driver.
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        source: Box<tungstenite::Error>,
    },

    /// The connection is closed; no further frames will flow.
    #[error("driver connection closed")]
    Closed,

    /// An I/O error occurred on the underlying socket.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A websocket protocol error occurred.
    #[error("websocket error: {0}")]
    WebSocket(Box<tungstenite::Error>),
}

pub type Result<T> = std::result::Result<T, TransportError>;
