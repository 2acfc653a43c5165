//! Outbound command messages for the driver's feedback endpoint.
//!
//! The driver accepts four request shapes: Register, Submit (by key, with
//! options, or with an inline frame) and Stop. Each serializes to a single
//! self-contained JSON text frame. Field names and casing are the driver's
//! contract: the envelope is PascalCase, frame payload fields camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::point::{DotPoint, PathPoint};
use crate::position::Position;

/// A single outbound command message.
///
/// Externally tagged serialization gives the driver's envelope for free:
/// `{"Submit":[{...}]}`, `{"Register":[{...}]}`, `{"Stop":[{...}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Register(Vec<RegisterCommand>),
    Submit(Vec<SubmitCommand>),
    Stop(Vec<StopCommand>),
}

/// Registers a pre-authored pattern project under a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterCommand {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Project")]
    pub project: Project,
}

/// The tracks/layout pair extracted from a pattern project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "Tracks")]
    pub tracks: Value,
    #[serde(rename = "Layout")]
    pub layout: Value,
}

/// Starts playback, either of a registered key or of an inline frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitCommand {
    /// `"key"` for registered patterns, `"frame"` for inline frames.
    #[serde(rename = "Type")]
    pub submit_type: String,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Parameters", skip_serializing_if = "Option::is_none")]
    pub parameters: Option<SubmitParameters>,
    #[serde(rename = "Frame", skip_serializing_if = "Option::is_none")]
    pub frame: Option<FramePayload>,
}

/// Playback options for a registered pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitParameters {
    /// Key under which this playback instance is tracked by the driver.
    #[serde(rename = "altKey")]
    pub alt_key: String,
    /// e.g. `{"offsetAngleX": 90, "offsetY": 0}`.
    #[serde(rename = "rotationOption")]
    pub rotation_option: Value,
    /// e.g. `{"intensity": 1, "duration": 1}`.
    #[serde(rename = "scaleOption")]
    pub scale_option: Value,
}

/// Stops playback of a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopCommand {
    #[serde(rename = "Key")]
    pub key: String,
}

/// One playback instruction: a target position, dot or path points, and a
/// duration. Immutable once built; submitted under a pattern key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePayload {
    pub position: Position,
    #[serde(rename = "dotPoints", default, skip_serializing_if = "Vec::is_empty")]
    pub dot_points: Vec<DotPoint>,
    #[serde(rename = "pathPoints", default, skip_serializing_if = "Vec::is_empty")]
    pub path_points: Vec<PathPoint>,
    #[serde(rename = "durationMillis")]
    pub duration_millis: u32,
}

impl FramePayload {
    /// A frame of discrete motor activations.
    pub fn dots(position: Position, dot_points: Vec<DotPoint>, duration_millis: u32) -> Self {
        Self {
            position,
            dot_points,
            path_points: Vec::new(),
            duration_millis,
        }
    }

    /// A frame of continuous-coordinate activations.
    pub fn paths(position: Position, path_points: Vec<PathPoint>, duration_millis: u32) -> Self {
        Self {
            position,
            dot_points: Vec::new(),
            path_points,
            duration_millis,
        }
    }
}

impl Message {
    /// Register a pattern project (tracks + layout) under `key`.
    pub fn register(key: impl Into<String>, tracks: Value, layout: Value) -> Self {
        Message::Register(vec![RegisterCommand {
            key: key.into(),
            project: Project { tracks, layout },
        }])
    }

    /// Start playback of a previously registered key.
    pub fn submit_key(key: impl Into<String>) -> Self {
        Message::Submit(vec![SubmitCommand {
            submit_type: "key".to_string(),
            key: key.into(),
            parameters: None,
            frame: None,
        }])
    }

    /// Start playback of a registered key with scale/rotation options.
    pub fn submit_key_with_options(
        key: impl Into<String>,
        alt_key: impl Into<String>,
        scale_option: Value,
        rotation_option: Value,
    ) -> Self {
        Message::Submit(vec![SubmitCommand {
            submit_type: "key".to_string(),
            key: key.into(),
            parameters: Some(SubmitParameters {
                alt_key: alt_key.into(),
                rotation_option,
                scale_option,
            }),
            frame: None,
        }])
    }

    /// Submit an inline frame under `key`.
    pub fn submit_frame(key: impl Into<String>, frame: FramePayload) -> Self {
        Message::Submit(vec![SubmitCommand {
            submit_type: "frame".to_string(),
            key: key.into(),
            parameters: None,
            frame: Some(frame),
        }])
    }

    /// Stop playback of `key`.
    pub fn stop(key: impl Into<String>) -> Self {
        Message::Stop(vec![StopCommand { key: key.into() }])
    }

    /// Serialize to the single-frame wire text.
    ///
    /// Cannot fail for messages built through the constructors above; the
    /// `Result` exists because `tracks`/`layout` are caller-supplied JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
