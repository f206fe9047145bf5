//! Integration tests for the processing pipeline building blocks

use std::path::{Path, PathBuf};

use audiocut_cli::error::AudioCutError;
use audiocut_cli::pipeline::{sweep_intermediates, ProcessOptions, SourceProcessor};
use audiocut_cli::playlist::Playlist;
use audiocut_cli::trim::{TrimList, TrimRange};
use audiocut_cli::utils::path::{cut_wav_path, temp_wav_path, track_wav_path};
use audiocut_cli::{Config, DescaleAa, FrameRate};

// Trim specification

#[test]
fn test_trim_list_round_trip_to_seconds() {
    let trims: TrimList = "[[None,3500],[4000,None]]".parse().unwrap();
    let ranges = trims.ranges();
    assert_eq!(ranges.len(), 2);

    let rate = FrameRate::NTSC_FILM;
    let frame_count = 34048;

    // First segment: file start up to frame 3499 (positive end is shifted back one)
    let (start, end) = ranges[0].resolve_seconds(frame_count, rate).unwrap();
    assert_eq!(start, 0.0);
    assert!((end - 3499.0 * 1001.0 / 24000.0).abs() < 1e-9);

    // Second segment: frame 4000 to file end
    let (start, end) = ranges[1].resolve_seconds(frame_count, rate).unwrap();
    assert!((start - 4000.0 * 1001.0 / 24000.0).abs() < 1e-9);
    assert!((end - 34048.0 * 1001.0 / 24000.0).abs() < 1e-9);
}

#[test]
fn test_trim_list_negative_tail_crop() {
    // The classic OP/ED crop: drop 24 frames from both ends
    let trims: TrimList = "[24,-24]".parse().unwrap();
    let TrimList::Single(range) = trims else {
        panic!("expected a single trim");
    };
    assert_eq!(range, TrimRange::new(Some(24), Some(-24)));
    assert_eq!(range.resolve(34048).unwrap(), (24, 34024));
}

// Intermediate naming

#[test]
fn test_intermediate_naming_chain() {
    let input = Path::new("/enc/ep01.m2ts");

    // Container track 2 (ffprobe stream index 1) extracts to _2.wav
    let track = track_wav_path(input, 2);
    assert_eq!(track, PathBuf::from("/enc/ep01_2.wav"));

    // Segments and the finished cut derive from the track name
    assert_eq!(
        temp_wav_path(&track, 1),
        PathBuf::from("/enc/ep01_2_temp1.wav")
    );
    assert_eq!(cut_wav_path(&track), PathBuf::from("/enc/ep01_2_cut.wav"));
}

// Source processing error paths (no external tools required)

#[test]
fn test_process_file_requires_existing_input() {
    let processor = SourceProcessor::new(Config::default());
    let err = processor
        .process_file(
            Path::new("/no/such/episode.m2ts"),
            &ProcessOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, AudioCutError::InputFileNotFound { .. }));
}

#[test]
fn test_process_tracks_trims_need_frame_count() {
    let processor = SourceProcessor::new(Config::default());
    let options = ProcessOptions {
        trims: Some("[0,100]".parse().unwrap()),
        frame_rate: Some(FrameRate::NTSC_FILM),
        ..Default::default()
    };

    let err = processor
        .process_tracks(vec![PathBuf::from("ep01_2.wav")], &options, None, None)
        .unwrap_err();
    assert!(matches!(err, AudioCutError::MissingFrameMetadata { .. }));
}

// Playlist mapping

#[test]
fn test_playlist_load_and_clip_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("00001.json");
    std::fs::write(
        &path,
        r#"{"clip": ["/bd/00001.m2ts", "/bd/00002.m2ts", ""]}"#,
    )
    .unwrap();

    let playlist = Playlist::load(&path).unwrap();
    assert_eq!(
        playlist.clips(),
        vec![
            PathBuf::from("/bd/00001.m2ts"),
            PathBuf::from("/bd/00002.m2ts")
        ]
    );
}

// Cleanup sweep

#[test]
fn test_sweep_leaves_sources_and_encodes() {
    let dir = tempfile::tempdir().unwrap();
    let keep = [
        dir.path().join("ep01_2.wav"),
        dir.path().join("ep01_2_cut.flac"),
        dir.path().join("ep01_2_cut.aac"),
    ];
    let remove = [
        dir.path().join("ep01_2_cut.wav"),
        dir.path().join("ep01_2_temp1.wav"),
        dir.path().join("ep01_2_temp2.wav"),
    ];
    for f in keep.iter().chain(remove.iter()) {
        std::fs::write(f, b"RIFF").unwrap();
    }

    let removed = sweep_intermediates(dir.path(), false).unwrap();
    assert_eq!(removed.len(), remove.len());
    for f in &keep {
        assert!(f.exists(), "{} should survive the sweep", f.display());
    }
    for f in &remove {
        assert!(!f.exists(), "{} should be swept", f.display());
    }
}

// VapourSynth script generation

#[test]
fn test_descale_script_reflects_parameters() {
    let script = DescaleAa::new()
        .with_resolution(1440, 810)
        .with_threshold(12)
        .with_kernel("delanczos")
        .with_taps(4)
        .with_mask_growth(2, 5)
        .render_script(Path::new("/enc/ep01.mkv"));

    assert!(script.contains("kernel='lanczos'"));
    assert!(script.contains("fvf.Resize(src_y, 1440, 810,"));
    assert!(script.contains("taps=4"));
    assert!(script.contains("thr = 12 * ((1 << bits) - 1) // 0xFF"));
    assert!(script.contains("for _ in range(2):"));
    assert!(script.contains("for _ in range(5):"));
    assert!(script.contains("out.set_output()"));
}
