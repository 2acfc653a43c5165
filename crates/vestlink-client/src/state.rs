//! Shared connection state and the live driver-state snapshot.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;
use vestlink_proto::{Position, StatusFrame};

/// Lifecycle of the single driver connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// The latest (active keys, connected positions) pair received from the
/// driver's status feed.
///
/// Snapshots are immutable once published: the receiver loop builds a fresh
/// one per status frame and swaps it in as a unit, so readers observe either
/// the previous or the next pair, never a mixture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    active_keys: BTreeSet<String>,
    connected_positions: BTreeSet<Position>,
}

impl StateSnapshot {
    /// Build a snapshot from a parsed status frame.
    ///
    /// Positions this client doesn't model (from a newer driver) are skipped
    /// rather than failing the whole frame.
    pub fn from_status(status: &StatusFrame) -> Self {
        let active_keys = status.active_keys.iter().cloned().collect();
        let connected_positions = status
            .connected_positions
            .iter()
            .filter_map(|name| {
                let position = Position::from_driver_name(name);
                if position.is_none() {
                    debug!(%name, "skipping unknown device position");
                }
                position
            })
            .collect();
        Self {
            active_keys,
            connected_positions,
        }
    }

    /// True if any pattern key is currently playing.
    pub fn is_playing(&self) -> bool {
        !self.active_keys.is_empty()
    }

    /// True if `key` is currently playing.
    pub fn is_playing_key(&self, key: &str) -> bool {
        self.active_keys.contains(key)
    }

    /// True if the device at `position` is connected.
    pub fn is_device_connected(&self, position: Position) -> bool {
        self.connected_positions.contains(&position)
    }

    /// The currently active pattern keys, in sorted order.
    pub fn active_keys(&self) -> impl Iterator<Item = &str> {
        self.active_keys.iter().map(String::as_str)
    }

    /// The currently connected device positions, in sorted order.
    pub fn connected_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.connected_positions.iter().copied()
    }
}

/// State shared between the connection's background thread and its readers.
///
/// The receiver loop is the sole writer of the snapshot; the connection
/// manager additionally flips the lifecycle word on open/close.
#[derive(Debug)]
pub(crate) struct SharedState {
    state: Mutex<ConnectionState>,
    snapshot: RwLock<Arc<StateSnapshot>>,
}

impl SharedState {
    pub(crate) fn new(initial: ConnectionState) -> Self {
        Self {
            state: Mutex::new(initial),
            snapshot: RwLock::new(Arc::new(StateSnapshot::default())),
        }
    }

    pub(crate) fn connection_state(&self) -> ConnectionState {
        match self.state.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub(crate) fn set_connection_state(&self, state: ConnectionState) {
        match self.state.lock() {
            Ok(mut guard) => *guard = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }

    /// Atomically replace the published snapshot.
    pub(crate) fn publish(&self, snapshot: StateSnapshot) {
        let snapshot = Arc::new(snapshot);
        match self.snapshot.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    /// The current snapshot. Cheap: clones an `Arc`, never blocks on I/O.
    pub(crate) fn snapshot(&self) -> Arc<StateSnapshot> {
        match self.snapshot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}
