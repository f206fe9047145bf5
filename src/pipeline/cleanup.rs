//! Intermediate file removal

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::AudioCutResult;
use crate::utils::path::is_intermediate_wav;

/// Remove the given files, skipping any that no longer exist.
///
/// Returns the paths that were actually removed.
pub fn cleanup_files(files: &[PathBuf]) -> AudioCutResult<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for file in files {
        if file.exists() {
            std::fs::remove_file(file)?;
            debug!("Removed {}", file.display());
            removed.push(file.clone());
        }
    }
    Ok(removed)
}

/// Sweep a directory tree for leftover intermediate WAVs
/// (`*_temp<K>.wav`, `*_cut.wav`, `*_concat.wav`) and remove them.
///
/// With `dry_run` the matches are only reported.
pub fn sweep_intermediates(dir: &Path, dry_run: bool) -> AudioCutResult<Vec<PathBuf>> {
    let mut matches = Vec::new();

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_intermediate_wav(&name) {
            matches.push(entry.path().to_path_buf());
        }
    }

    if dry_run {
        for path in &matches {
            info!("Would remove {}", path.display());
        }
        return Ok(matches);
    }

    cleanup_files(&matches)
}
