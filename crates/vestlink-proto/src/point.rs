use serde::{Deserialize, Serialize};

/// A discrete actuation point: one motor on a panel, by grid index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotPoint {
    /// Motor index within the panel grid (0..=19, row-major).
    pub index: u8,
    /// Vibration intensity (0..=100).
    pub intensity: u8,
}

/// A continuous actuation point: a normalized coordinate on a panel.
///
/// Coordinates are forwarded verbatim; resolving them to a physical motor
/// is the driver's job (funnelling effect), not this client's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Horizontal position, 0.0 (left) to 1.0 (right).
    pub x: f64,
    /// Vertical position, 0.0 (bottom) to 1.0 (top).
    pub y: f64,
    /// Vibration intensity (0..=100).
    pub intensity: u8,
}
