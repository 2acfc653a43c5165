//! Websocket transport to the local bHaptics Player driver process.
//!
//! The driver exposes a single long-lived duplex websocket on loopback;
//! messages in both directions are UTF-8 text frames. This crate owns the
//! socket-level concerns only: connecting, sending one text frame, polling
//! for one inbound text frame, closing. Everything above (state mirroring,
//! command fan-out) lives in `vestlink-client`.

pub mod endpoint;
pub mod error;
pub mod traits;
pub mod ws;

pub use endpoint::DriverEndpoint;
pub use error::{Result, TransportError};
pub use traits::DriverTransport;
pub use ws::WsTransport;
