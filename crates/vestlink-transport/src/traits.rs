use crate::error::Result;

/// A duplex text-frame connection to the driver.
///
/// Implemented by [`WsTransport`](crate::ws::WsTransport) for the real
/// driver; client tests substitute in-memory implementations.
pub trait DriverTransport: Send {
    /// Send one text frame. Blocks until the frame is written out.
    fn send_text(&mut self, payload: &str) -> Result<()>;

    /// Poll for one inbound text frame.
    ///
    /// Returns `Ok(None)` when no frame arrived within the transport's poll
    /// window, so a single-threaded connection loop can interleave sends.
    /// Returns [`TransportError::Closed`](crate::TransportError::Closed)
    /// once the peer has gone away for good.
    fn poll_text(&mut self) -> Result<Option<String>>;

    /// Close the connection. Best effort; errors are not surfaced.
    fn close(&mut self);
}
