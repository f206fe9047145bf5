//! Media file inspection module

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::utils::frames::FrameRate;

pub mod inspector;

pub use inspector::MediaProber;

/// Media file information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// File path
    pub path: PathBuf,
    /// Container format
    pub container: String,
    /// Duration in seconds, when the container reports one
    pub duration: Option<f64>,
    /// File size in bytes
    pub file_size: u64,
    /// Video streams information
    pub video_streams: Vec<VideoStreamInfo>,
    /// Audio streams information
    pub audio_streams: Vec<AudioStreamInfo>,
}

/// Video stream information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStreamInfo {
    /// Global stream index within the container
    pub index: usize,
    /// Codec name
    pub codec: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate as reported by the container
    pub frame_rate: Option<FrameRate>,
}

/// Audio stream information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioStreamInfo {
    /// Global stream index within the container.
    ///
    /// eac3to numbers container tracks starting at 1, so extraction uses
    /// `index + 1`.
    pub index: usize,
    /// Codec name
    pub codec: String,
    /// Sample rate in Hz
    pub sample_rate: Option<u32>,
    /// Number of channels
    pub channels: Option<u32>,
    /// Language tag
    pub language: Option<String>,
}

impl MediaInfo {
    /// Frame rate of the first video stream
    pub fn frame_rate(&self) -> Option<FrameRate> {
        self.video_streams.first().and_then(|s| s.frame_rate)
    }

    /// Total frame count implied by the container duration and frame rate
    pub fn frame_count(&self) -> Option<u64> {
        let rate = self.frame_rate()?;
        let duration = self.duration?;
        Some(rate.frames_in(duration))
    }

    /// Total number of streams the probe saw
    pub fn total_streams(&self) -> usize {
        self.video_streams.len() + self.audio_streams.len()
    }
}
