//! Intermediate file naming conventions
//!
//! Every stage of the pipeline derives its output names from the input stem:
//! extracted tracks are `{stem}_{N}.wav` (N is the 1-based container track
//! number), per-segment trims are `{track_stem}_temp{K}.wav`, finished cuts
//! are `{track_stem}_cut.wav`, and playlist concatenations are
//! `{first_part_stem}_{N}_concat.wav`.

use std::path::{Path, PathBuf};

/// Replace the extension of a path, keeping its directory and stem
pub fn with_extension(path: &Path, ext: &str) -> PathBuf {
    path.with_extension(ext)
}

/// Append a suffix to the file stem and set the extension
pub fn with_stem_suffix(path: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!("{}{}.{}", stem, suffix, ext);
    path.with_file_name(name)
}

/// Path of an extracted track: `{input_stem}_{track_number}.wav`
pub fn track_wav_path(input: &Path, track_number: usize) -> PathBuf {
    with_stem_suffix(input, &format!("_{}", track_number), "wav")
}

/// Path of a finished cut: `{track_stem}_cut.wav`
pub fn cut_wav_path(track: &Path) -> PathBuf {
    with_stem_suffix(track, "_cut", "wav")
}

/// Path of a per-segment temp file: `{track_stem}_temp{K}.wav`, K 1-based
pub fn temp_wav_path(track: &Path, segment: usize) -> PathBuf {
    with_stem_suffix(track, &format!("_temp{}", segment), "wav")
}

/// Path of a playlist concatenation: `{first_part_stem}_{track_number}_concat.wav`
pub fn concat_wav_path(first_part: &Path, track_number: usize) -> PathBuf {
    with_stem_suffix(first_part, &format!("_{}_concat", track_number), "wav")
}

/// Whether a file name matches one of the intermediate WAV naming patterns
pub fn is_intermediate_wav(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".wav") else {
        return false;
    };

    if stem.ends_with("_cut") || stem.ends_with("_concat") {
        return true;
    }

    // `{stem}_temp{K}.wav` with a non-empty numeric K
    if let Some(pos) = stem.rfind("_temp") {
        let digits = &stem[pos + "_temp".len()..];
        return !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_wav_path() {
        let input = Path::new("/enc/episode01.mkv");
        assert_eq!(
            track_wav_path(input, 2),
            PathBuf::from("/enc/episode01_2.wav")
        );
    }

    #[test]
    fn test_cut_and_temp_paths() {
        let track = Path::new("/enc/episode01_2.wav");
        assert_eq!(
            cut_wav_path(track),
            PathBuf::from("/enc/episode01_2_cut.wav")
        );
        assert_eq!(
            temp_wav_path(track, 1),
            PathBuf::from("/enc/episode01_2_temp1.wav")
        );
    }

    #[test]
    fn test_concat_path() {
        let part = Path::new("/bd/00001.m2ts");
        assert_eq!(
            concat_wav_path(part, 2),
            PathBuf::from("/bd/00001_2_concat.wav")
        );
    }

    #[test]
    fn test_with_extension() {
        assert_eq!(
            with_extension(Path::new("/enc/ep01_2_cut.wav"), "flac"),
            PathBuf::from("/enc/ep01_2_cut.flac")
        );
    }

    #[test]
    fn test_is_intermediate_wav() {
        assert!(is_intermediate_wav("ep01_2_cut.wav"));
        assert!(is_intermediate_wav("ep01_2_temp1.wav"));
        assert!(is_intermediate_wav("ep01_2_temp12.wav"));
        assert!(is_intermediate_wav("00001_2_concat.wav"));
        assert!(!is_intermediate_wav("ep01_2.wav"));
        assert!(!is_intermediate_wav("ep01_2_cut.flac"));
        assert!(!is_intermediate_wav("ep01_temp.wav"));
        assert!(!is_intermediate_wav("ep01_tempo.wav"));
    }
}
