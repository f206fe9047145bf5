//! TOML configuration for tool locations and encoder defaults
//!
//! An optional `audiocut.toml` in the working directory (or a file given via
//! `--config` / `AUDIOCUT_CONFIG`) overrides where external binaries are found
//! and the default encoder settings:
//!
//! ```toml
//! [tools]
//! eac3to = "C:/enc/eac3to/eac3to.exe"
//! qaac = "C:/enc/qaac/qaac64.exe"
//!
//! [defaults]
//! frame_rate = "24000/1001"
//! flac_level = 8
//! aac_quality = 127
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AudioCutError, AudioCutResult};

/// Per-tool binary path overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolPaths {
    pub eac3to: Option<PathBuf>,
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
    pub sox: Option<PathBuf>,
    pub flac: Option<PathBuf>,
    pub qaac: Option<PathBuf>,
    pub vspipe: Option<PathBuf>,
}

/// Default pipeline settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Fallback frame rate when the container has none, e.g. "24000/1001"
    pub frame_rate: Option<String>,
    /// FLAC compression level (0-8)
    pub flac_level: Option<u8>,
    /// qaac true VBR quality (0-127)
    pub aac_quality: Option<u8>,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolPaths,
    #[serde(default)]
    pub defaults: Defaults,
}

impl Config {
    /// Default config file name looked up in the working directory
    pub const DEFAULT_FILE: &'static str = "audiocut.toml";

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> AudioCutResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AudioCutError::ConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| AudioCutError::ConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load an explicit config file, or `audiocut.toml` from the working
    /// directory if present, or built-in defaults
    pub fn discover(explicit: Option<&Path>) -> AudioCutResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default = Path::new(Self::DEFAULT_FILE);
        if default.exists() {
            return Self::load(default);
        }

        Ok(Self::default())
    }

    /// Configured path override for a tool, if any
    pub fn tool_override(&self, name: &str) -> Option<&Path> {
        let path = match name {
            "eac3to" => &self.tools.eac3to,
            "ffmpeg" => &self.tools.ffmpeg,
            "ffprobe" => &self.tools.ffprobe,
            "sox" => &self.tools.sox,
            "flac" => &self.tools.flac,
            "qaac" => &self.tools.qaac,
            "vspipe" => &self.tools.vspipe,
            _ => &None,
        };
        path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [tools]
            eac3to = "/opt/eac3to/eac3to"
            sox = "/usr/bin/sox"

            [defaults]
            frame_rate = "24000/1001"
            flac_level = 5
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.tool_override("eac3to"),
            Some(Path::new("/opt/eac3to/eac3to"))
        );
        assert_eq!(config.tool_override("sox"), Some(Path::new("/usr/bin/sox")));
        assert_eq!(config.tool_override("qaac"), None);
        assert_eq!(config.defaults.flac_level, Some(5));
        assert_eq!(config.defaults.aac_quality, None);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.tools.eac3to.is_none());
        assert!(config.defaults.frame_rate.is_none());
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tools").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(AudioCutError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_discover_missing_explicit_is_error() {
        assert!(Config::discover(Some(Path::new("/no/such/config.toml"))).is_err());
    }
}
