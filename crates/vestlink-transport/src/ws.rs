use std::io::ErrorKind;
use std::net::TcpStream;
use std::time::Duration;

use tracing::{debug, info};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use crate::endpoint::DriverEndpoint;
use crate::error::{Result, TransportError};
use crate::traits::DriverTransport;

/// How long a single [`poll_text`](DriverTransport::poll_text) call waits
/// for inbound data before yielding back to the connection loop.
pub const DEFAULT_POLL_WINDOW: Duration = Duration::from_millis(20);

/// Blocking websocket connection to the driver.
#[derive(Debug)]
pub struct WsTransport {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
    /// Connect to the driver with the default poll window.
    pub fn connect(endpoint: &DriverEndpoint) -> Result<Self> {
        Self::connect_with_poll_window(endpoint, DEFAULT_POLL_WINDOW)
    }

    /// Connect with an explicit poll window.
    pub fn connect_with_poll_window(
        endpoint: &DriverEndpoint,
        poll_window: Duration,
    ) -> Result<Self> {
        let url = endpoint.url();
        let (socket, _response) =
            tungstenite::connect(url.as_str()).map_err(|source| TransportError::Connect {
                url: url.clone(),
                source: Box::new(source),
            })?;

        // Haptic commands are small and latency-sensitive; disable Nagle.
        // The read timeout turns blocking reads into the poll window that
        // lets the connection thread interleave queued writes.
        if let MaybeTlsStream::Plain(stream) = socket.get_ref() {
            stream.set_nodelay(true)?;
            stream.set_read_timeout(Some(poll_window))?;
        }

        info!(%url, "connected to driver");
        Ok(Self { socket })
    }
}

impl DriverTransport for WsTransport {
    fn send_text(&mut self, payload: &str) -> Result<()> {
        self.socket
            .send(Message::Text(payload.to_string()))
            .map_err(map_ws_error)
    }

    fn poll_text(&mut self) -> Result<Option<String>> {
        match self.socket.read() {
            Ok(Message::Text(text)) => Ok(Some(text)),
            Ok(Message::Close(_)) => Err(TransportError::Closed),
            // Ping/pong are handled inside tungstenite; binary frames are
            // not part of the driver protocol.
            Ok(other) => {
                debug!(kind = ?other, "ignoring non-text frame");
                Ok(None)
            }
            Err(tungstenite::Error::Io(err))
                if err.kind() == ErrorKind::WouldBlock || err.kind() == ErrorKind::TimedOut =>
            {
                Ok(None)
            }
            Err(err) => Err(map_ws_error(err)),
        }
    }

    fn close(&mut self) {
        let _ = self.socket.close(None);
        let _ = self.socket.flush();
        debug!("driver connection closed");
    }
}

fn map_ws_error(err: tungstenite::Error) -> TransportError {
    use tungstenite::error::ProtocolError;

    match err {
        tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => {
            TransportError::Closed
        }
        // A driver process dying mid-session resets the TCP stream without
        // a websocket closing handshake.
        tungstenite::Error::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
            TransportError::Closed
        }
        tungstenite::Error::Io(io) => TransportError::Io(io),
        other => TransportError::WebSocket(Box::new(other)),
    }
}
