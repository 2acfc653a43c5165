//! The command facade: the public surface external callers use.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};
use vestlink_proto::{
    map_discrete, map_funnel, DotPoint, FramePayload, Message, Panel, PathPoint, Position,
};
use vestlink_transport::{DriverEndpoint, DriverTransport};

use crate::connection::Connection;
use crate::error::Result;
use crate::sequencer::MotorSink;
use crate::state::StateSnapshot;
use crate::tact;

/// Facade configuration.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Driver endpoint to connect to.
    pub endpoint: DriverEndpoint,
    /// Grace period between the stop burst in [`Player::stop_all`] and
    /// connection teardown, giving the driver time to process the stops.
    pub stop_linger: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            endpoint: DriverEndpoint::local(),
            stop_linger: Duration::from_secs(1),
        }
    }
}

/// Client for the local haptic driver.
///
/// Command delivery is best-effort: once initialized, submit/stop calls
/// never fail on transport problems; a lost cue is logged and life goes
/// on. Validation errors (bad panel, out-of-range input, unreadable pattern
/// file) and initialization failures are surfaced, since nothing would work
/// afterwards.
///
/// All methods take `&self`; the facade may be shared across threads.
pub struct Player {
    config: PlayerConfig,
    connection: Mutex<Option<Connection>>,
}

impl Player {
    /// A player targeting the local driver with default configuration.
    pub fn new() -> Self {
        Self::with_config(PlayerConfig::default())
    }

    /// A player with explicit configuration.
    pub fn with_config(config: PlayerConfig) -> Self {
        Self {
            config,
            connection: Mutex::new(None),
        }
    }

    /// Connect to the driver and start mirroring its status feed.
    ///
    /// Idempotent: initializing an already-connected player is a no-op.
    pub fn initialize(&self) -> Result<()> {
        let mut guard = self.lock_connection();
        if guard.as_ref().is_some_and(Connection::is_connected) {
            debug!("already connected, initialize is a no-op");
            return Ok(());
        }
        let connection = Connection::open(&self.config.endpoint)?;
        *guard = Some(connection);
        info!(endpoint = %self.config.endpoint, "haptic player initialized");
        Ok(())
    }

    /// Initialize over an already-established transport (tests, recorders).
    /// Same idempotency as [`initialize`](Player::initialize).
    pub fn initialize_with_transport(&self, transport: Box<dyn DriverTransport>) {
        let mut guard = self.lock_connection();
        if guard.as_ref().is_some_and(Connection::is_connected) {
            debug!("already connected, initialize is a no-op");
            return;
        }
        *guard = Some(Connection::with_transport(transport));
    }

    /// Register the pattern project in `path` (a `.tact` file) under `key`.
    ///
    /// File errors are surfaced; the Register command itself is delivered
    /// best-effort like every other command.
    pub fn register_pattern(&self, key: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        let (tracks, layout) = tact::load_project(path.as_ref())?;
        self.send(&Message::register(key, tracks, layout));
        Ok(())
    }

    /// Start playback of a registered pattern.
    pub fn submit_registered(&self, key: impl Into<String>) {
        self.send(&Message::submit_key(key));
    }

    /// Start playback of a registered pattern with scale/rotation options,
    /// tracked under `alt_key`.
    pub fn submit_registered_with_options(
        &self,
        key: impl Into<String>,
        alt_key: impl Into<String>,
        scale_option: Value,
        rotation_option: Value,
    ) {
        self.send(&Message::submit_key_with_options(
            key,
            alt_key,
            scale_option,
            rotation_option,
        ));
    }

    /// Submit an ad-hoc frame under `key`.
    pub fn submit_frame(&self, key: impl Into<String>, frame: FramePayload) {
        self.send(&Message::submit_frame(key, frame));
    }

    /// Submit a frame of discrete motor activations under `key`.
    pub fn submit_dot(
        &self,
        key: impl Into<String>,
        position: Position,
        dot_points: Vec<DotPoint>,
        duration_millis: u32,
    ) {
        self.submit_frame(key, FramePayload::dots(position, dot_points, duration_millis));
    }

    /// Submit a frame of continuous-coordinate activations under `key`.
    pub fn submit_path(
        &self,
        key: impl Into<String>,
        position: Position,
        path_points: Vec<PathPoint>,
        duration_millis: u32,
    ) {
        self.submit_frame(key, FramePayload::paths(position, path_points, duration_millis));
    }

    /// Activate one motor by grid index.
    ///
    /// Validation failures surface immediately and nothing is sent.
    pub fn activate_discrete(
        &self,
        panel: Panel,
        motor_index: u8,
        intensity: u8,
        duration_ms: u32,
    ) -> Result<()> {
        let point = map_discrete(panel, motor_index, intensity, duration_ms)?;
        let key = format!("{}Frame_motor_{}", panel.as_str(), motor_index);
        self.submit_dot(key, panel.position(), vec![point], duration_ms);
        Ok(())
    }

    /// Activate the perceived point at normalized coordinates via the
    /// driver's funnelling effect.
    pub fn activate_funnel(
        &self,
        panel: Panel,
        x: f64,
        y: f64,
        intensity: u8,
        duration_ms: u32,
    ) -> Result<()> {
        let point = map_funnel(panel, x, y, intensity, duration_ms)?;
        let key = format!("{}Frame_{}_{}", panel.as_str(), x, y);
        self.submit_path(key, panel.position(), vec![point], duration_ms);
        Ok(())
    }

    /// Stop playback of `key`.
    pub fn stop_pattern(&self, key: impl Into<String>) {
        self.send(&Message::stop(key));
    }

    /// Stop every active pattern, then tear down the connection.
    ///
    /// Terminal for the session: afterwards
    /// [`is_initialized`](Player::is_initialized) is false until
    /// `initialize` is called again.
    pub fn stop_all(&self) {
        let keys: Vec<String> = self
            .snapshot()
            .active_keys()
            .map(str::to_string)
            .collect();
        for key in keys {
            self.stop_pattern(key);
        }

        if !self.config.stop_linger.is_zero() {
            std::thread::sleep(self.config.stop_linger);
        }

        if let Some(mut connection) = self.lock_connection().take() {
            connection.close();
            info!("haptic player shut down");
        }
    }

    /// True if any pattern key is currently playing.
    pub fn is_playing(&self) -> bool {
        self.snapshot().is_playing()
    }

    /// True if `key` is currently playing.
    pub fn is_playing_key(&self, key: &str) -> bool {
        self.snapshot().is_playing_key(key)
    }

    /// True if the device at `position` is connected.
    pub fn is_device_connected(&self, position: Position) -> bool {
        self.snapshot().is_device_connected(position)
    }

    /// True while a live connection to the driver exists.
    pub fn is_initialized(&self) -> bool {
        self.lock_connection()
            .as_ref()
            .is_some_and(Connection::is_connected)
    }

    /// The latest driver-state snapshot. Never blocks on I/O.
    pub fn snapshot(&self) -> Arc<StateSnapshot> {
        self.lock_connection()
            .as_ref()
            .map(Connection::snapshot)
            .unwrap_or_default()
    }

    /// Best-effort delivery: failures are logged, never propagated.
    fn send(&self, message: &Message) {
        match self.lock_connection().as_ref() {
            Some(connection) => {
                if let Err(err) = connection.send(message) {
                    warn!(error = %err, "haptic command dropped");
                }
            }
            None => debug!("haptic command dropped (player not initialized)"),
        }
    }

    fn lock_connection(&self) -> MutexGuard<'_, Option<Connection>> {
        match self.connection.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorSink for Player {
    fn activate(&self, panel: Panel, motor_index: u8, intensity: u8, duration_ms: u32) -> Result<()> {
        self.activate_discrete(panel, motor_index, intensity, duration_ms)
    }
}
