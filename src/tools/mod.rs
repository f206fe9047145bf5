//! External tool detection and management
//!
//! Everything this tool does is delegated to external binaries: eac3to or
//! ffmpeg for demuxing, ffprobe for metadata, sox for WAV editing, flac and
//! qaac for encoding, vspipe for driving VapourSynth scripts.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use crate::error::{AudioCutError, AudioCutResult};

/// Information about an external tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    /// Name of the tool
    pub name: String,
    /// Whether the tool is available
    pub available: bool,
    /// Version string if available
    pub version: Option<String>,
    /// Path to the tool executable
    pub path: Option<PathBuf>,
}

/// Check if a tool is available, probing its version with the given argument
pub fn check_tool_with_arg(name: &str, version_arg: &str) -> ToolInfo {
    let result = Command::new(name).arg(version_arg).output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path: which::which(name).ok(),
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check if a tool is on PATH without running it (for tools with no version flag)
pub fn check_tool_path_only(name: &str) -> ToolInfo {
    let path = which::which(name).ok();
    ToolInfo {
        name: name.to_string(),
        available: path.is_some(),
        version: None,
        path,
    }
}

/// Check every tool the pipeline can invoke
pub fn check_tools() -> Vec<ToolInfo> {
    vec![
        // eac3to and qaac have no clean version query; path lookup only
        check_tool_path_only("eac3to"),
        check_tool_with_arg("ffmpeg", "-version"),
        check_tool_with_arg("ffprobe", "-version"),
        check_tool_with_arg("sox", "--version"),
        check_tool_with_arg("flac", "--version"),
        check_tool_path_only("qaac"),
        check_tool_with_arg("vspipe", "--version"),
    ]
}

/// Require that a tool is available, returning its path
pub fn require_tool(name: &str) -> AudioCutResult<PathBuf> {
    which::which(name).map_err(|_| AudioCutError::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> AudioCutResult<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }

    require_tool(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tool_not_found() {
        let info = check_tool_with_arg("nonexistent_tool_12345", "--version");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert!(info.path.is_none());
    }

    #[test]
    fn test_require_tool_not_found() {
        assert!(matches!(
            require_tool("nonexistent_tool_12345"),
            Err(AudioCutError::ToolNotFound { .. })
        ));
    }

    #[test]
    fn test_get_tool_path_prefers_existing_override() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = get_tool_path("nonexistent_tool_12345", Some(file.path())).unwrap();
        assert_eq!(path, file.path());
    }

    #[test]
    fn test_get_tool_path_ignores_missing_override() {
        let missing = Path::new("/definitely/not/here/eac3to");
        assert!(get_tool_path("nonexistent_tool_12345", Some(missing)).is_err());
    }
}
