//! The connection manager: owns the single persistent driver connection.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{debug, warn};
use vestlink_proto::Message;
use vestlink_transport::{DriverEndpoint, DriverTransport, WsTransport};

use crate::error::{ClientError, Result};
use crate::receiver;
use crate::state::{ConnectionState, SharedState, StateSnapshot};

/// One live connection to the driver.
///
/// The socket itself lives on a background thread (the state receiver);
/// [`send`](Connection::send) enqueues commands which that thread writes out
/// between receive polls, preserving program order on the wire.
pub struct Connection {
    outbound: Sender<String>,
    shared: Arc<SharedState>,
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Connection {
    /// Open a websocket connection to the driver and start the receiver.
    pub fn open(endpoint: &DriverEndpoint) -> Result<Self> {
        let shared = Arc::new(SharedState::new(ConnectionState::Connecting));
        let transport = match WsTransport::connect(endpoint) {
            Ok(transport) => transport,
            Err(err) => {
                shared.set_connection_state(ConnectionState::Disconnected);
                return Err(err.into());
            }
        };
        Ok(Self::spawn(Box::new(transport), shared))
    }

    /// Start a connection over an already-established transport.
    ///
    /// This is the seam for driving the client against something other than
    /// the real driver socket (tests, recorders).
    pub fn with_transport(transport: Box<dyn DriverTransport>) -> Self {
        let shared = Arc::new(SharedState::new(ConnectionState::Connecting));
        Self::spawn(transport, shared)
    }

    fn spawn(transport: Box<dyn DriverTransport>, shared: Arc<SharedState>) -> Self {
        let (outbound, queue) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        shared.set_connection_state(ConnectionState::Connected);

        let thread = {
            let shared_for_thread = Arc::clone(&shared);
            let shutdown = Arc::clone(&shutdown);
            let result = std::thread::Builder::new()
                .name("vestlink-receiver".to_string())
                .spawn(move || receiver::run(transport, shared_for_thread, queue, shutdown));
            match result {
                Ok(handle) => {
                    debug!("connection established, receiver running");
                    Some(handle)
                }
                Err(err) => {
                    warn!(error = %err, "failed to spawn receiver thread");
                    shared.set_connection_state(ConnectionState::Disconnected);
                    None
                }
            }
        };

        Self {
            outbound,
            shared,
            shutdown,
            thread,
        }
    }

    /// Enqueue a command for delivery.
    ///
    /// Fire-and-forget from the caller's perspective: no driver response is
    /// awaited. Fails with [`ClientError::NotConnected`] once the receiver
    /// loop has terminated (the facade logs and swallows that, per policy).
    pub fn send(&self, message: &Message) -> Result<()> {
        let payload = message.to_json()?;
        self.outbound
            .send(payload)
            .map_err(|_| ClientError::NotConnected)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.shared.connection_state()
    }

    /// True while the receiver loop is alive on an open transport.
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// The latest published driver-state snapshot.
    pub fn snapshot(&self) -> Arc<StateSnapshot> {
        self.shared.snapshot()
    }

    /// Close the connection: drain queued commands, tear down the socket,
    /// join the receiver thread.
    pub fn close(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
