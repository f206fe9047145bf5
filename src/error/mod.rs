//! Error handling module for AudioCut

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for AudioCut operations
#[derive(Error, Debug)]
pub enum AudioCutError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {}", path.display())]
    InputFileNotFound { path: PathBuf },

    /// A required external tool is missing from both PATH and config
    #[error("Required tool not found: {tool}. Install it or set its path in audiocut.toml")]
    ToolNotFound { tool: String },

    /// An external tool exited unsuccessfully
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    /// Failed to parse the output of an external tool
    #[error("Failed to parse {tool} output: {message}")]
    ParseError { tool: String, message: String },

    /// Invalid trim list syntax
    #[error("Invalid trim list '{input}': {message}")]
    InvalidTrimList { input: String, message: String },

    /// Trim range validation error
    #[error("Invalid trim range: start frame {start} must be before end frame {end}")]
    InvalidTrimRange { start: i64, end: i64 },

    /// Trim endpoints resolved outside the source
    #[error("Trim resolves to [{start}, {end}] which falls outside the {frame_count}-frame source")]
    TrimOutOfRange {
        start: i64,
        end: i64,
        frame_count: u64,
    },

    /// Invalid frame rate string
    #[error("Invalid frame rate '{value}'. Expected a rational like 24000/1001")]
    InvalidFrameRate { value: String },

    /// Source carries no frame metadata and none was supplied
    #[error("Source does not contain {field} information. Specify it with the --{flag} argument")]
    MissingFrameMetadata { field: String, flag: String },

    /// Source contains nothing to extract
    #[error("{} contains no audio streams", path.display())]
    NoAudioStreams { path: PathBuf },

    /// Playlist file error
    #[error("Invalid playlist: {message}")]
    InvalidPlaylist { message: String },

    /// Config file error
    #[error("Invalid config file {}: {message}", path.display())]
    ConfigError { path: PathBuf, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AudioCutError {
    /// Create a tool not found error
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for AudioCut operations
pub type AudioCutResult<T> = std::result::Result<T, AudioCutError>;
