//! Connection management, state mirroring and command facade for the
//! bHaptics driver.
//!
//! This is the "just works" layer. A [`Player`] owns one persistent
//! connection to the local driver process, mirrors the driver's status feed
//! into an immutable [`StateSnapshot`] on a background thread, and exposes
//! the command surface for registering and playing tactile patterns.
//!
//! Command delivery is deliberately best-effort: a dropped haptic cue is not
//! safety-critical, so write failures are logged and swallowed at the facade
//! boundary. Validation errors and initialization failures, which indicate
//! caller bugs or an absent driver, are always surfaced.

pub mod connection;
pub mod error;
pub mod player;
mod receiver;
pub mod sequencer;
pub mod state;
mod tact;

pub use connection::Connection;
pub use error::{ClientError, Result};
pub use player::{Player, PlayerConfig};
pub use sequencer::{play, play_with_config, MotorSink, PatternStep, SequencerConfig};
pub use state::{ConnectionState, StateSnapshot};
