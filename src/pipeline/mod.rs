//! End-to-end source processing
//!
//! The three entry points mirror the three kinds of source the tool accepts:
//! a container file, a set of already-extracted WAV tracks, and a multi-part
//! playlist. All of them end in the same tail: optional frame-accurate cut,
//! FLAC/AAC encode, intermediate cleanup.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::encode::{AacEncoder, FlacEncoder};
use crate::error::{AudioCutError, AudioCutResult};
use crate::extract::TrackExtractor;
use crate::playlist::{gather_playlist_audio, Playlist, PlaylistAudio};
use crate::probe::MediaProber;
use crate::sox::Sox;
use crate::trim::{cut_tracks, TrimList};
use crate::utils::frames::FrameRate;

pub mod cleanup;

pub use cleanup::{cleanup_files, sweep_intermediates};

/// Options shared by every processing entry point
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Frame-indexed trims to apply, if any
    pub trims: Option<TrimList>,
    /// Frame rate override; wins over probed metadata
    pub frame_rate: Option<FrameRate>,
    /// Frame count override; wins over probed metadata
    pub frame_count: Option<u64>,
    /// Encode cut tracks to FLAC
    pub flac: bool,
    /// Encode cut tracks to AAC
    pub aac: bool,
    /// Remove intermediate WAVs when done
    pub cleanup: bool,
    /// Show external tool output instead of suppressing it
    pub verbose: bool,
    /// FLAC compression level (0-8)
    pub flac_level: u8,
    /// qaac true VBR quality (0-127)
    pub aac_quality: u8,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            trims: None,
            frame_rate: None,
            frame_count: None,
            flac: true,
            aac: true,
            cleanup: true,
            verbose: false,
            flac_level: crate::encode::MAX_FLAC_LEVEL,
            aac_quality: crate::encode::MAX_AAC_QUALITY,
        }
    }
}

/// What a processing run produced and removed
#[derive(Debug, Clone, Default)]
pub struct ProcessReport {
    /// Encoded FLAC files
    pub flac_outputs: Vec<PathBuf>,
    /// Encoded AAC files
    pub aac_outputs: Vec<PathBuf>,
    /// Intermediates removed during cleanup
    pub cleaned: Vec<PathBuf>,
}

/// Processes sources end to end with a shared tool configuration
pub struct SourceProcessor {
    config: Config,
}

impl SourceProcessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Process a container file: probe, extract, cut, encode, clean up.
    pub fn process_file(
        &self,
        input: &Path,
        options: &ProcessOptions,
    ) -> AudioCutResult<ProcessReport> {
        if !input.exists() {
            return Err(AudioCutError::InputFileNotFound {
                path: input.to_path_buf(),
            });
        }

        let prober = MediaProber::from_config(&self.config)?;
        let info = prober.probe(input)?;
        info!(
            "{}: {} audio stream(s) in {} container",
            input.display(),
            info.audio_streams.len(),
            info.container
        );

        let extractor =
            TrackExtractor::detect(&self.config)?.with_verbose(options.verbose);
        let extracted = extractor.extract_all(input, &info)?;
        if extracted.is_empty() {
            return Err(AudioCutError::NoAudioStreams {
                path: input.to_path_buf(),
            });
        }

        let frame_rate = self.resolve_frame_rate(options, info.frame_rate());
        let frame_count = options.frame_count.or(info.frame_count());

        self.finish_tracks(extracted, options, frame_rate, frame_count)
    }

    /// Process already-extracted WAV tracks: cut, encode, clean up.
    ///
    /// The inputs themselves count as intermediates and are removed during
    /// cleanup.
    pub fn process_tracks(
        &self,
        tracks: Vec<PathBuf>,
        options: &ProcessOptions,
        frame_rate: Option<FrameRate>,
        frame_count: Option<u64>,
    ) -> AudioCutResult<ProcessReport> {
        let frame_rate = self.resolve_frame_rate(options, frame_rate);
        let frame_count = options.frame_count.or(frame_count);
        self.finish_tracks(tracks, options, frame_rate, frame_count)
    }

    /// Process a playlist source.
    ///
    /// Multi-part playlists are concatenated track-wise first; single-part
    /// playlists degrade to [`Self::process_file`] on the sole clip.
    pub fn process_playlist(
        &self,
        playlist: &Playlist,
        options: &ProcessOptions,
    ) -> AudioCutResult<ProcessReport> {
        let prober = MediaProber::from_config(&self.config)?;
        let extractor =
            TrackExtractor::detect(&self.config)?.with_verbose(options.verbose);
        let sox = Sox::from_config(&self.config)?;

        match gather_playlist_audio(playlist, &prober, &extractor, &sox, !options.cleanup)? {
            PlaylistAudio::SinglePart(clip) => self.process_file(&clip, options),
            PlaylistAudio::MultiPart(concat) => {
                let frame_rate = self.resolve_frame_rate(options, concat.frame_rate);
                let frame_count = options.frame_count.or(concat.frame_count);
                self.finish_tracks(concat.tracks, options, frame_rate, frame_count)
            }
        }
    }

    /// Common tail: cut, encode, clean up.
    fn finish_tracks(
        &self,
        tracks: Vec<PathBuf>,
        options: &ProcessOptions,
        frame_rate: FrameRate,
        frame_count: Option<u64>,
    ) -> AudioCutResult<ProcessReport> {
        let mut report = ProcessReport::default();

        let (encode_inputs, intermediates) = match &options.trims {
            Some(trims) => {
                let frame_count = frame_count.ok_or_else(|| {
                    AudioCutError::MissingFrameMetadata {
                        field: "duration".to_string(),
                        flag: "frame-count".to_string(),
                    }
                })?;
                let sox = Sox::from_config(&self.config)?;
                let cut = cut_tracks(&sox, &tracks, trims, frame_rate, frame_count)?;

                let mut intermediates = tracks;
                intermediates.extend(cut.temp_files);
                intermediates.extend(cut.cut_files.iter().cloned());
                (cut.cut_files, intermediates)
            }
            None => (tracks.clone(), tracks),
        };

        if options.flac {
            let encoder = FlacEncoder::from_config(&self.config)?
                .with_level(options.flac_level)
                .with_verbose(options.verbose);
            report.flac_outputs = encoder.encode_all(&encode_inputs)?;
        }
        if options.aac {
            let encoder = AacEncoder::from_config(&self.config)?
                .with_quality(options.aac_quality)
                .with_verbose(options.verbose);
            report.aac_outputs = encoder.encode_all(&encode_inputs)?;
        }

        if options.cleanup {
            report.cleaned = cleanup_files(&intermediates)?;
        }

        info!(
            "Done: {} FLAC, {} AAC, {} intermediates removed",
            report.flac_outputs.len(),
            report.aac_outputs.len(),
            report.cleaned.len()
        );
        Ok(report)
    }

    /// Explicit rate, then probed rate, then the 24000/1001 default
    fn resolve_frame_rate(
        &self,
        options: &ProcessOptions,
        probed: Option<FrameRate>,
    ) -> FrameRate {
        if let Some(rate) = options.frame_rate {
            return rate;
        }
        if let Some(rate) = probed {
            return rate;
        }
        if let Some(value) = &self.config.defaults.frame_rate {
            if let Ok(rate) = value.parse::<FrameRate>() {
                return rate;
            }
            warn!("Ignoring invalid defaults.frame_rate '{}' in config", value);
        }
        FrameRate::NTSC_FILM
    }
}
