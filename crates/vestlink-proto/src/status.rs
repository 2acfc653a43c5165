//! Inbound status frames from the driver's feedback feed.

use serde::Deserialize;

/// One status frame as sent by the driver.
///
/// The driver includes further fields (playback progress, device details);
/// only the two consumed by the client are modeled, the rest are ignored.
/// A frame missing either field is malformed and gets dropped upstream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusFrame {
    #[serde(rename = "ActiveKeys")]
    pub active_keys: Vec<String>,
    #[serde(rename = "ConnectedPositions")]
    pub connected_positions: Vec<String>,
}

impl StatusFrame {
    /// Parse a status frame from websocket text.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_frame() {
        let frame =
            StatusFrame::parse(r#"{"ActiveKeys":["p1","p2"],"ConnectedPositions":["Vest"]}"#)
                .unwrap();
        assert_eq!(frame.active_keys, vec!["p1", "p2"]);
        assert_eq!(frame.connected_positions, vec!["Vest"]);
    }

    #[test]
    fn parses_empty_sets() {
        let frame = StatusFrame::parse(r#"{"ActiveKeys":[],"ConnectedPositions":[]}"#).unwrap();
        assert!(frame.active_keys.is_empty());
        assert!(frame.connected_positions.is_empty());
    }

    #[test]
    fn ignores_extra_driver_fields() {
        let frame = StatusFrame::parse(
            r#"{"ActiveKeys":["p1"],"ConnectedPositions":[],"RegisteredKeys":["a"],"Status":{}}"#,
        )
        .unwrap();
        assert_eq!(frame.active_keys, vec!["p1"]);
    }

    #[test]
    fn missing_active_keys_is_malformed() {
        assert!(StatusFrame::parse(r#"{"ConnectedPositions":["Vest"]}"#).is_err());
    }

    #[test]
    fn missing_connected_positions_is_malformed() {
        assert!(StatusFrame::parse(r#"{"ActiveKeys":[]}"#).is_err());
    }

    #[test]
    fn non_object_frame_is_malformed() {
        assert!(StatusFrame::parse("[]").is_err());
        assert!(StatusFrame::parse("not json").is_err());
    }
}
