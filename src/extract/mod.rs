//! Audio track extraction from containers
//!
//! eac3to is preferred because it writes gapless, delay-corrected WAVs from
//! Blu-ray streams; when it is not installed the extractor falls back to
//! plain `ffmpeg -map` demuxing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AudioCutError, AudioCutResult};
use crate::probe::MediaInfo;
use crate::tools;
use crate::utils::path::track_wav_path;

/// Which demuxer backs the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    Eac3to,
    Ffmpeg,
}

impl ExtractorKind {
    /// Tool name as invoked
    pub fn tool_name(&self) -> &'static str {
        match self {
            ExtractorKind::Eac3to => "eac3to",
            ExtractorKind::Ffmpeg => "ffmpeg",
        }
    }
}

/// Extracts audio tracks from a container to WAV files next to the input
pub struct TrackExtractor {
    kind: ExtractorKind,
    path: PathBuf,
    verbose: bool,
}

impl TrackExtractor {
    /// Create an eac3to-backed extractor from an explicit binary path
    pub fn eac3to(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ExtractorKind::Eac3to,
            path: path.into(),
            verbose: false,
        }
    }

    /// Create an ffmpeg-backed extractor from an explicit binary path
    pub fn ffmpeg(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ExtractorKind::Ffmpeg,
            path: path.into(),
            verbose: false,
        }
    }

    /// Pick the best available demuxer: eac3to when present, ffmpeg otherwise
    pub fn detect(config: &Config) -> AudioCutResult<Self> {
        if let Ok(path) = tools::get_tool_path("eac3to", config.tool_override("eac3to")) {
            debug!("Using eac3to at {}", path.display());
            return Ok(Self::eac3to(path));
        }

        let path = tools::get_tool_path("ffmpeg", config.tool_override("ffmpeg"))
            .map_err(|_| AudioCutError::tool_not_found("eac3to or ffmpeg"))?;
        debug!("eac3to not found, using ffmpeg at {}", path.display());
        Ok(Self::ffmpeg(path))
    }

    /// Show tool output on the console instead of suppressing it
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Which demuxer this extractor invokes
    pub fn kind(&self) -> ExtractorKind {
        self.kind
    }

    /// Build the argument list for extracting one stream.
    ///
    /// `stream_index` is the global ffprobe stream index; eac3to numbers
    /// container tracks from 1, hence the `+ 1`.
    pub fn args(
        kind: ExtractorKind,
        input: &Path,
        stream_index: usize,
        output: &Path,
    ) -> Vec<OsString> {
        match kind {
            ExtractorKind::Eac3to => vec![
                input.into(),
                "-log=NUL".into(),
                format!("{}:", stream_index + 1).into(),
                output.into(),
            ],
            ExtractorKind::Ffmpeg => vec![
                "-y".into(),
                "-hide_banner".into(),
                "-i".into(),
                input.into(),
                "-map".into(),
                format!("0:{}", stream_index).into(),
                "-acodec".into(),
                "pcm_s16le".into(),
                output.into(),
            ],
        }
    }

    /// Extract a single stream to `{input_stem}_{N}.wav`, returning the path
    pub fn extract_stream(&self, input: &Path, stream_index: usize) -> AudioCutResult<PathBuf> {
        let output = track_wav_path(input, stream_index + 1);
        let args = Self::args(self.kind, input, stream_index, &output);

        info!(
            "Extracting stream {} of {} with {}",
            stream_index,
            input.display(),
            self.kind.tool_name()
        );

        if self.verbose {
            let status = Command::new(&self.path)
                .args(args)
                .status()
                .map_err(|e| self.map_spawn_error(e))?;
            if !status.success() {
                return Err(AudioCutError::tool_failed(
                    self.kind.tool_name(),
                    format!("exited with {}", status),
                ));
            }
        } else {
            let out = Command::new(&self.path)
                .args(args)
                .stdout(Stdio::null())
                .output()
                .map_err(|e| self.map_spawn_error(e))?;
            if !out.status.success() {
                let stderr = String::from_utf8_lossy(&out.stderr);
                return Err(AudioCutError::tool_failed(
                    self.kind.tool_name(),
                    stderr.trim().to_string(),
                ));
            }
        }

        Ok(output)
    }

    /// Extract every audio stream the probe found, in stream order
    pub fn extract_all(&self, input: &Path, info: &MediaInfo) -> AudioCutResult<Vec<PathBuf>> {
        let mut extracted = Vec::with_capacity(info.audio_streams.len());
        for stream in &info.audio_streams {
            extracted.push(self.extract_stream(input, stream.index)?);
        }
        Ok(extracted)
    }

    fn map_spawn_error(&self, e: std::io::Error) -> AudioCutError {
        if e.kind() == std::io::ErrorKind::NotFound {
            AudioCutError::tool_not_found(self.kind.tool_name())
        } else {
            AudioCutError::IoError(e)
        }
    }
}
