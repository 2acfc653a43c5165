use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// An attachment point recognised by the driver.
///
/// Variant names match the driver's wire strings exactly (`"VestFront"`,
/// `"ForearmL"`, ...), so serde can derive the wire form directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Vest,
    VestFront,
    VestBack,
    ForearmL,
    ForearmR,
    Head,
    HandL,
    HandR,
    FootL,
    FootR,
    GloveL,
    GloveR,
}

/// All positions, in wire-name order. Handy for connectivity sweeps.
pub const ALL_POSITIONS: [Position; 12] = [
    Position::Vest,
    Position::VestFront,
    Position::VestBack,
    Position::ForearmL,
    Position::ForearmR,
    Position::Head,
    Position::HandL,
    Position::HandR,
    Position::FootL,
    Position::FootR,
    Position::GloveL,
    Position::GloveR,
];

impl Position {
    /// The driver's name for this position.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Vest => "Vest",
            Position::VestFront => "VestFront",
            Position::VestBack => "VestBack",
            Position::ForearmL => "ForearmL",
            Position::ForearmR => "ForearmR",
            Position::Head => "Head",
            Position::HandL => "HandL",
            Position::HandR => "HandR",
            Position::FootL => "FootL",
            Position::FootR => "FootR",
            Position::GloveL => "GloveL",
            Position::GloveR => "GloveR",
        }
    }

    /// Parse a driver position name. Returns `None` for names this client
    /// does not model (newer drivers may advertise more).
    pub fn from_driver_name(name: &str) -> Option<Self> {
        ALL_POSITIONS.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two 20-motor vest panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Panel {
    Front,
    Back,
}

impl Panel {
    /// Lowercase panel name, as used in generated frame keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Panel::Front => "front",
            Panel::Back => "back",
        }
    }

    /// The driver position addressed by this panel.
    pub fn position(self) -> Position {
        match self {
            Panel::Front => Position::VestFront,
            Panel::Back => Position::VestBack,
        }
    }
}

impl FromStr for Panel {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "front" => Ok(Panel::Front),
            "back" => Ok(Panel::Back),
            _ => Err(MapError::InvalidPanel(s.to_string())),
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
