//! Blu-ray playlist (mpls) sources
//!
//! An mpls describes an ordered set of clips that play back-to-back. Parsing
//! the binary playlist is out of scope; the caller hands in a pre-parsed
//! mapping as JSON, e.g. `{"clip": ["/bd/00001.m2ts", "/bd/00002.m2ts"]}`,
//! as produced by an external mpls reader.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{AudioCutError, AudioCutResult};
use crate::extract::TrackExtractor;
use crate::pipeline::cleanup_files;
use crate::probe::MediaProber;
use crate::sox::Sox;
use crate::utils::frames::FrameRate;
use crate::utils::path::concat_wav_path;

/// Pre-parsed playlist mapping
#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    /// Ordered clip paths; empty entries are skipped
    pub clip: Vec<String>,
}

impl Playlist {
    /// Load a playlist mapping from a JSON file
    pub fn load(path: &Path) -> AudioCutResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let playlist: Playlist =
            serde_json::from_str(&content).map_err(|e| AudioCutError::InvalidPlaylist {
                message: e.to_string(),
            })?;

        if playlist.clips().is_empty() {
            return Err(AudioCutError::InvalidPlaylist {
                message: "playlist contains no clips".to_string(),
            });
        }
        Ok(playlist)
    }

    /// Non-empty clip paths in playback order
    pub fn clips(&self) -> Vec<PathBuf> {
        self.clip
            .iter()
            .filter(|c| !c.is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

/// Concatenated playlist audio, with the frame totals of the whole playlist
#[derive(Debug, Clone)]
pub struct ConcatResult {
    /// One concatenated WAV per audio track position
    pub tracks: Vec<PathBuf>,
    /// Frame rate shared by the parts, when the containers report one
    pub frame_rate: Option<FrameRate>,
    /// Total frame count across all parts, when every part reports one
    pub frame_count: Option<u64>,
}

/// Audio gathered from a playlist
#[derive(Debug, Clone)]
pub enum PlaylistAudio {
    /// Single-part playlists degrade to plain file processing
    SinglePart(PathBuf),
    /// Multi-part playlists yield track-wise concatenations
    MultiPart(ConcatResult),
}

/// Extract and concatenate the audio of every part of a playlist.
///
/// Track `i` of every part is concatenated in playback order into
/// `{first_part_stem}_{i+2}_concat.wav` (the `+2` continues eac3to's
/// numbering past the video track). The per-part WAVs are removed afterwards
/// unless `keep_intermediates` is set.
pub fn gather_playlist_audio(
    playlist: &Playlist,
    prober: &MediaProber,
    extractor: &TrackExtractor,
    sox: &Sox,
    keep_intermediates: bool,
) -> AudioCutResult<PlaylistAudio> {
    let clips = playlist.clips();

    if clips.is_empty() {
        return Err(AudioCutError::InvalidPlaylist {
            message: "playlist contains no clips".to_string(),
        });
    }

    if let [clip] = clips.as_slice() {
        debug!("Single-part playlist, processing the clip directly");
        return Ok(PlaylistAudio::SinglePart(clip.clone()));
    }

    let mut part_tracks: Vec<Vec<PathBuf>> = Vec::with_capacity(clips.len());
    let mut frame_rate: Option<FrameRate> = None;
    let mut frame_counts: Vec<Option<u64>> = Vec::with_capacity(clips.len());

    for clip in &clips {
        let info = prober.probe(clip)?;

        if let Some(rate) = info.frame_rate() {
            match frame_rate {
                None => frame_rate = Some(rate),
                Some(existing) if existing != rate => {
                    return Err(AudioCutError::InvalidPlaylist {
                        message: format!(
                            "parts disagree on frame rate: {} vs {}",
                            existing, rate
                        ),
                    });
                }
                Some(_) => {}
            }
        }
        frame_counts.push(info.frame_count());

        let tracks = extractor.extract_all(clip, &info)?;
        if tracks.is_empty() {
            return Err(AudioCutError::InvalidPlaylist {
                message: format!("part {} contains no audio streams", clip.display()),
            });
        }
        part_tracks.push(tracks);
    }

    let track_count = part_tracks[0].len();
    if part_tracks.iter().any(|tracks| tracks.len() != track_count) {
        return Err(AudioCutError::InvalidPlaylist {
            message: "parts have differing audio track counts".to_string(),
        });
    }

    // Trims against the concatenation need the playlist's total length
    let frame_count = frame_counts
        .iter()
        .copied()
        .sum::<Option<u64>>();

    let first_part = &clips[0];
    let mut concatenated = Vec::with_capacity(track_count);
    for i in 0..track_count {
        let inputs: Vec<PathBuf> = part_tracks.iter().map(|tracks| tracks[i].clone()).collect();
        let output = concat_wav_path(first_part, i + 2);
        info!(
            "Concatenating track {} of {} parts -> {}",
            i + 2,
            part_tracks.len(),
            output.display()
        );
        sox.concatenate(&inputs, &output)?;
        concatenated.push(output);
    }

    if !keep_intermediates {
        for tracks in &part_tracks {
            cleanup_files(tracks)?;
        }
    }

    Ok(PlaylistAudio::MultiPart(ConcatResult {
        tracks: concatenated,
        frame_rate,
        frame_count,
    }))
}
