//! Loading of pre-authored `.tact` pattern project files.
//!
//! A `.tact` file is a JSON document exported by the pattern designer; the
//! driver only needs its `project.tracks` and `project.layout` sections,
//! which get forwarded verbatim inside a Register message.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{ClientError, Result};

/// Read a pattern project file and extract its (tracks, layout) pair.
pub(crate) fn load_project(path: &Path) -> Result<(Value, Value)> {
    let text = fs::read_to_string(path).map_err(|source| ClientError::PatternFile {
        path: path.to_path_buf(),
        source,
    })?;
    let data: Value = serde_json::from_str(&text).map_err(|source| ClientError::PatternParse {
        path: path.to_path_buf(),
        source,
    })?;

    let project = data.get("project").ok_or_else(|| ClientError::PatternShape {
        path: path.to_path_buf(),
        missing: "project",
    })?;
    let tracks = project
        .get("tracks")
        .cloned()
        .ok_or_else(|| ClientError::PatternShape {
            path: path.to_path_buf(),
            missing: "project.tracks",
        })?;
    let layout = project
        .get("layout")
        .cloned()
        .ok_or_else(|| ClientError::PatternShape {
            path: path.to_path_buf(),
            missing: "project.layout",
        })?;

    Ok((tracks, layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("vestlink-tact-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn extracts_tracks_and_layout() {
        let path = temp_file(
            "ok.tact",
            r#"{"project":{"tracks":[{"enable":true}],"layout":{"type":"Vest"}},"name":"demo"}"#,
        );
        let (tracks, layout) = load_project(&path).unwrap();
        assert_eq!(tracks, serde_json::json!([{"enable": true}]));
        assert_eq!(layout, serde_json::json!({"type": "Vest"}));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_project(Path::new("/nonexistent/missing.tact")).unwrap_err();
        assert!(matches!(err, ClientError::PatternFile { .. }));
        assert!(err.to_string().contains("missing.tact"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let path = temp_file("bad.tact", "{not json");
        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, ClientError::PatternParse { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_sections_are_named() {
        let path = temp_file("no-project.tact", r#"{"name":"demo"}"#);
        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, ClientError::PatternShape { missing: "project", .. }));
        let _ = fs::remove_file(path);

        let path = temp_file("no-layout.tact", r#"{"project":{"tracks":[]}}"#);
        let err = load_project(&path).unwrap_err();
        assert!(matches!(
            err,
            ClientError::PatternShape {
                missing: "project.layout",
                ..
            }
        ));
        let _ = fs::remove_file(path);
    }
}
