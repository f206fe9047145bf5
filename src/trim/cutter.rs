//! Track cutting: applies a trim list to a set of extracted WAV tracks

use std::path::PathBuf;

use tracing::info;

use crate::error::AudioCutResult;
use crate::sox::Sox;
use crate::trim::TrimList;
use crate::utils::frames::FrameRate;
use crate::utils::path::{cut_wav_path, temp_wav_path};

/// Result of cutting a batch of tracks
#[derive(Debug, Clone, Default)]
pub struct CutOutput {
    /// One `{track_stem}_cut.wav` per input track
    pub cut_files: Vec<PathBuf>,
    /// Per-segment intermediates awaiting cleanup
    pub temp_files: Vec<PathBuf>,
}

/// Cut every track to the trim list.
///
/// A single trim goes straight to `{track_stem}_cut.wav`. Multiple trims are
/// cut to `{track_stem}_temp{K}.wav` segments and concatenated into the cut
/// file; the segments are reported for later cleanup.
pub fn cut_tracks(
    sox: &Sox,
    tracks: &[PathBuf],
    trims: &TrimList,
    rate: FrameRate,
    frame_count: u64,
) -> AudioCutResult<CutOutput> {
    let mut output = CutOutput::default();

    for track in tracks {
        let cut_file = cut_wav_path(track);
        info!("Cutting {} -> {}", track.display(), cut_file.display());

        match trims {
            TrimList::Single(range) => {
                let (start, end) = range.resolve_seconds(frame_count, rate)?;
                sox.trim(track, &cut_file, start, end)?;
            }
            TrimList::Multi(ranges) => {
                let mut segments = Vec::with_capacity(ranges.len());
                for (k, range) in ranges.iter().enumerate() {
                    let segment = temp_wav_path(track, k + 1);
                    let (start, end) = range.resolve_seconds(frame_count, rate)?;
                    sox.trim(track, &segment, start, end)?;
                    segments.push(segment);
                }
                sox.concatenate(&segments, &cut_file)?;
                output.temp_files.extend(segments);
            }
        }

        output.cut_files.push(cut_file);
    }

    Ok(output)
}
