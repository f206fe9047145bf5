//! FFprobe-based media probing

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{AudioCutError, AudioCutResult};
use crate::probe::{AudioStreamInfo, MediaInfo, VideoStreamInfo};
use crate::tools;
use crate::utils::frames::FrameRate;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: String,
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: usize,
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    channels: Option<u32>,
    sample_rate: Option<String>,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
}

/// Media prober backed by the ffprobe binary
pub struct MediaProber {
    path: PathBuf,
}

impl MediaProber {
    /// Create a prober from an explicit ffprobe path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate ffprobe via config override or PATH
    pub fn from_config(config: &Config) -> AudioCutResult<Self> {
        let path = tools::get_tool_path("ffprobe", config.tool_override("ffprobe"))?;
        Ok(Self::new(path))
    }

    /// Probe a media file
    pub fn probe(&self, input: &Path) -> AudioCutResult<MediaInfo> {
        if !input.exists() {
            return Err(AudioCutError::InputFileNotFound {
                path: input.to_path_buf(),
            });
        }

        debug!("Probing {}", input.display());

        let output = Command::new(&self.path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(input)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AudioCutError::tool_not_found("ffprobe")
                } else {
                    AudioCutError::IoError(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioCutError::tool_failed("ffprobe", stderr.to_string()));
        }

        let json = String::from_utf8(output.stdout)
            .map_err(|e| AudioCutError::parse_error("ffprobe", format!("invalid UTF-8: {}", e)))?;

        let parsed: FfprobeOutput = serde_json::from_str(&json)
            .map_err(|e| AudioCutError::parse_error("ffprobe", e.to_string()))?;

        Ok(build_media_info(input, parsed))
    }
}

fn build_media_info(path: &Path, output: FfprobeOutput) -> MediaInfo {
    let mut info = MediaInfo {
        path: path.to_path_buf(),
        container: output.format.format_name,
        duration: output.format.duration.and_then(|s| s.parse().ok()),
        file_size: output
            .format
            .size
            .and_then(|s| s.parse().ok())
            .unwrap_or(0),
        video_streams: Vec::new(),
        audio_streams: Vec::new(),
    };

    for stream in output.streams {
        match stream.codec_type.as_str() {
            "video" => info.video_streams.push(VideoStreamInfo {
                index: stream.index,
                codec: stream.codec_name.unwrap_or_default(),
                width: stream.width.unwrap_or(0),
                height: stream.height.unwrap_or(0),
                frame_rate: stream
                    .r_frame_rate
                    .and_then(|s| s.parse::<FrameRate>().ok()),
            }),
            "audio" => info.audio_streams.push(AudioStreamInfo {
                index: stream.index,
                codec: stream.codec_name.unwrap_or_default(),
                sample_rate: stream.sample_rate.and_then(|s| s.parse().ok()),
                channels: stream.channels,
                language: stream.tags.language,
            }),
            _ => {}
        }
    }

    info
}
