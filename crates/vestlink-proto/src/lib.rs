//! Actuator addressing and wire messages for the bHaptics Player feedback protocol.
//!
//! This is the pure layer of vestlink; no I/O lives here. It covers:
//! - Device positions and the two vest panels ([`Position`], [`Panel`])
//! - Validated addressing of individual motors ([`map_discrete`], [`map_funnel`])
//! - The four outbound command shapes ([`Message`]) and the dot/path frame
//!   payloads ([`FramePayload`])
//! - Parsing of the driver's inbound status feed ([`StatusFrame`])
//!
//! Field names on the wire are dictated by the external driver and must not
//! be changed.

pub mod error;
pub mod map;
pub mod message;
pub mod point;
pub mod position;
pub mod status;

pub use error::{MapError, Result};
pub use map::{map_discrete, map_funnel, GRID_COLS, GRID_ROWS, MAX_INTENSITY, MOTORS_PER_PANEL};
pub use message::{FramePayload, Message, SubmitParameters};
pub use point::{DotPoint, PathPoint};
pub use position::{Panel, Position, ALL_POSITIONS};
pub use status::StatusFrame;
