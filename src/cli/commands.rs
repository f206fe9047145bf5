//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::args::{
    CleanArgs, InspectArgs, PipelineArgs, PlaylistArgs, ProcessArgs, ScriptArgs, ToolsArgs,
};
use crate::config::Config;
use crate::descale::DescaleAa;
use crate::pipeline::{sweep_intermediates, ProcessOptions, ProcessReport, SourceProcessor};
use crate::playlist::Playlist;
use crate::probe::{MediaInfo, MediaProber};
use crate::tools::check_tools;
use crate::trim::TrimList;
use crate::utils::frames::FrameRate;

/// Build processing options from the shared pipeline arguments
fn build_options(args: &PipelineArgs) -> Result<ProcessOptions> {
    let trims = args
        .trims
        .as_deref()
        .map(|s| s.parse::<TrimList>())
        .transpose()
        .context("Failed to parse trim list")?;

    let frame_rate = args
        .frame_rate
        .as_deref()
        .map(|s| s.parse::<FrameRate>())
        .transpose()
        .context("Failed to parse frame rate")?;

    Ok(ProcessOptions {
        trims,
        frame_rate,
        frame_count: args.frame_count,
        flac: !args.no_flac,
        aac: !args.no_aac,
        cleanup: !args.no_cleanup,
        verbose: args.verbose,
        flac_level: args.flac_level,
        aac_quality: args.aac_quality,
    })
}

fn display_report(report: &ProcessReport) {
    for path in &report.flac_outputs {
        println!("flac: {}", path.display());
    }
    for path in &report.aac_outputs {
        println!("aac:  {}", path.display());
    }
    if !report.cleaned.is_empty() {
        println!("removed {} intermediate file(s)", report.cleaned.len());
    }
}

/// Execute the process command
pub fn process(args: ProcessArgs, config: Config) -> Result<()> {
    info!("Processing {}", args.input.display());

    let options = build_options(&args.pipeline)?;
    let processor = SourceProcessor::new(config);
    let report = processor
        .process_file(&args.input, &options)
        .context("Failed to process input")?;

    display_report(&report);
    Ok(())
}

/// Execute the playlist command
pub fn playlist(args: PlaylistArgs, config: Config) -> Result<()> {
    info!("Processing playlist {}", args.playlist.display());

    let options = build_options(&args.pipeline)?;
    let playlist = Playlist::load(&args.playlist).context("Failed to load playlist")?;
    let processor = SourceProcessor::new(config);
    let report = processor
        .process_playlist(&playlist, &options)
        .context("Failed to process playlist")?;

    display_report(&report);
    Ok(())
}

/// Execute the inspect command
pub fn inspect(args: InspectArgs, config: Config) -> Result<()> {
    let prober = MediaProber::from_config(&config)?;
    let info = prober
        .probe(&args.input)
        .context("Failed to probe input file")?;

    if args.json {
        let json = serde_json::to_string_pretty(&info)
            .context("Failed to serialize media info to JSON")?;
        println!("{}", json);
    } else {
        display_media_info(&info);
    }

    Ok(())
}

/// Execute the tools command
pub fn tools(args: ToolsArgs) -> Result<()> {
    let infos = check_tools();

    if args.json {
        let json = serde_json::to_string_pretty(&infos)
            .context("Failed to serialize tool info to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    println!("External tools");
    println!("==============");
    for info in &infos {
        let status = if info.available { "found" } else { "missing" };
        print!("  {:<8} {}", info.name, status);
        if let Some(path) = &info.path {
            print!("  ({})", path.display());
        }
        if let Some(version) = &info.version {
            print!("  {}", version);
        }
        println!();
    }

    Ok(())
}

/// Execute the script command
pub fn script(args: ScriptArgs, config: Config) -> Result<()> {
    let descale = DescaleAa::new()
        .with_resolution(args.width, args.height)
        .with_threshold(args.thr)
        .with_kernel(&args.kernel)
        .with_bicubic(args.b, args.c)
        .with_taps(args.taps)
        .with_mask_growth(args.expand, args.inflate)
        .with_showmask(args.showmask);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.source.with_extension("vpy"));

    descale
        .write_script(&args.source, &output)
        .context("Failed to write VapourSynth script")?;
    println!("wrote {}", output.display());

    if args.run {
        descale
            .run(&args.source, &config)
            .context("vspipe run failed")?;
    }

    Ok(())
}

/// Execute the clean command
pub fn clean(args: CleanArgs) -> Result<()> {
    let removed = sweep_intermediates(&args.dir, args.dry_run)
        .context("Failed to sweep for intermediates")?;

    let verb = if args.dry_run { "found" } else { "removed" };
    println!("{} {} intermediate file(s)", verb, removed.len());
    for path in &removed {
        println!("  {}", path.display());
    }

    Ok(())
}

/// Display media information in human-readable format
fn display_media_info(info: &MediaInfo) {
    println!("Media Information");
    println!("=================");
    println!("File: {}", info.path.display());
    println!("Container: {}", info.container);
    match info.duration {
        Some(duration) => println!("Duration: {:.3}s", duration),
        None => println!("Duration: unknown"),
    }
    println!("File Size: {} bytes", info.file_size);

    if let (Some(rate), Some(frames)) = (info.frame_rate(), info.frame_count()) {
        println!("Frames: {} @ {} fps", frames, rate);
    }
    println!();

    if !info.video_streams.is_empty() {
        println!("Video Streams:");
        for stream in &info.video_streams {
            print!(
                "  #{}: {} {}x{}",
                stream.index, stream.codec, stream.width, stream.height
            );
            if let Some(rate) = stream.frame_rate {
                print!(" @ {:.3} fps", rate.fps());
            }
            println!();
        }
        println!();
    }

    if !info.audio_streams.is_empty() {
        println!("Audio Streams:");
        for stream in &info.audio_streams {
            print!("  #{}: {}", stream.index, stream.codec);
            if let Some(sample_rate) = stream.sample_rate {
                print!(", {} Hz", sample_rate);
            }
            if let Some(channels) = stream.channels {
                print!(", {} ch", channels);
            }
            if let Some(language) = &stream.language {
                print!(" [{}]", language);
            }
            println!("  (eac3to track {})", stream.index + 1);
        }
    }
}
