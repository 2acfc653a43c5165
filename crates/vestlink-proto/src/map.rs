//! Validated mapping from addressing input to protocol-ready points.
//!
//! Both functions are pure: they range-check their input and package it,
//! nothing more. The `panel` argument participates so that callers validate
//! the full activation request in one place, even though the panel only
//! becomes part of the frame (not the point) further up the stack.

use crate::error::{MapError, Result};
use crate::point::{DotPoint, PathPoint};
use crate::position::Panel;

/// Rows per panel grid.
pub const GRID_ROWS: usize = 5;
/// Columns per panel grid.
pub const GRID_COLS: usize = 4;
/// Motors per panel (5 rows x 4 columns).
pub const MOTORS_PER_PANEL: usize = GRID_ROWS * GRID_COLS;
/// Maximum vibration intensity accepted by the driver.
pub const MAX_INTENSITY: u8 = 100;

/// Validate a discrete motor activation and package it as a [`DotPoint`].
///
/// `motor_index` addresses the panel's 5x4 grid row-major (index 0 is the
/// top-left motor, index 19 the bottom-right).
pub fn map_discrete(
    _panel: Panel,
    motor_index: u8,
    intensity: u8,
    duration_ms: u32,
) -> Result<DotPoint> {
    if usize::from(motor_index) >= MOTORS_PER_PANEL {
        return Err(out_of_range("motor index", f64::from(motor_index), 0.0, 19.0));
    }
    check_intensity(intensity)?;
    check_duration(duration_ms)?;

    Ok(DotPoint {
        index: motor_index,
        intensity,
    })
}

/// Validate a funnelling activation and package it as a [`PathPoint`].
///
/// Coordinates are passed through without rounding or snapping; the driver
/// resolves them to the nearest physical motor.
pub fn map_funnel(_panel: Panel, x: f64, y: f64, intensity: u8, duration_ms: u32) -> Result<PathPoint> {
    if !(0.0..=1.0).contains(&x) {
        return Err(out_of_range("x", x, 0.0, 1.0));
    }
    if !(0.0..=1.0).contains(&y) {
        return Err(out_of_range("y", y, 0.0, 1.0));
    }
    check_intensity(intensity)?;
    check_duration(duration_ms)?;

    Ok(PathPoint { x, y, intensity })
}

fn check_intensity(intensity: u8) -> Result<()> {
    if intensity > MAX_INTENSITY {
        return Err(out_of_range("intensity", f64::from(intensity), 0.0, 100.0));
    }
    Ok(())
}

fn check_duration(duration_ms: u32) -> Result<()> {
    if duration_ms == 0 {
        return Err(MapError::OutOfRange {
            field: "duration",
            value: 0.0,
            min: 1.0,
            max: f64::from(u32::MAX),
        });
    }
    Ok(())
}

fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> MapError {
    MapError::OutOfRange {
        field,
        value,
        min,
        max,
    }
}
