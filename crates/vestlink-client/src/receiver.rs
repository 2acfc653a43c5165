//! The state receiver loop: sole writer of the live state snapshot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use tracing::{debug, warn};
use vestlink_proto::StatusFrame;
use vestlink_transport::DriverTransport;

use crate::state::{ConnectionState, SharedState, StateSnapshot};

/// Drive the connection until shutdown or transport failure.
///
/// One iteration flushes queued outbound commands, then polls for one
/// inbound status frame. Malformed frames are dropped and the previous
/// snapshot stays published; a transport failure ends the loop and flips
/// the connection state to [`ConnectionState::Disconnected`] so readers can
/// observe the death instead of querying a silently stale feed forever.
pub(crate) fn run(
    mut transport: Box<dyn DriverTransport>,
    shared: Arc<SharedState>,
    outbound: Receiver<String>,
    shutdown: Arc<AtomicBool>,
) {
    loop {
        if shutdown.load(Ordering::Acquire) {
            // Graceful close: whatever was queued before close() still goes
            // out, in order, before the socket is torn down.
            flush_outbound(transport.as_mut(), &outbound);
            transport.close();
            shared.set_connection_state(ConnectionState::Disconnected);
            debug!("receiver loop shut down");
            return;
        }

        flush_outbound(transport.as_mut(), &outbound);

        match transport.poll_text() {
            Ok(Some(text)) => match StatusFrame::parse(&text) {
                Ok(status) => shared.publish(StateSnapshot::from_status(&status)),
                Err(err) => debug!(error = %err, "dropping malformed status frame"),
            },
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "driver feed terminated");
                transport.close();
                shared.set_connection_state(ConnectionState::Disconnected);
                return;
            }
        }
    }
}

/// Write out every queued command. Send failures are logged and dropped:
/// losing a haptic cue is acceptable, stalling the receive path is not.
fn flush_outbound(transport: &mut dyn DriverTransport, outbound: &Receiver<String>) {
    while let Ok(payload) = outbound.try_recv() {
        if let Err(err) = transport.send_text(&payload) {
            warn!(error = %err, "dropping outbound command");
        }
    }
}
