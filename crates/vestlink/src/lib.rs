//! Client for the bHaptics Player feedback websocket.
//!
//! vestlink keeps one persistent connection to the local driver process,
//! mirrors its status feed into a queryable snapshot, and plays tactile
//! patterns on the vest's two 5x4 actuator panels: by registered pattern
//! key, ad-hoc frame, single motor, or timed multi-step sequence.
//!
//! # Crate Structure
//!
//! - [`proto`] - Addressing validation, wire messages, status frame parsing
//! - [`transport`] - Websocket transport to the local driver process
//! - [`client`] - Connection manager, state receiver, command facade,
//!   pattern sequencer

/// Re-export protocol types.
pub mod proto {
    pub use vestlink_proto::*;
}

/// Re-export transport types.
pub mod transport {
    pub use vestlink_transport::*;
}

/// Re-export client types.
pub mod client {
    pub use vestlink_client::*;
}

pub use vestlink_client::{Player, PlayerConfig};
pub use vestlink_proto::{Panel, Position};
