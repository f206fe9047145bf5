//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

fn flac_level(s: &str) -> Result<u8, String> {
    clap_num::number_range(s, 0, crate::encode::MAX_FLAC_LEVEL)
}

fn aac_quality(s: &str) -> Result<u8, String> {
    clap_num::number_range(s, 0, crate::encode::MAX_AAC_QUALITY)
}

/// Options shared by the process and playlist commands
#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Trim list in frames, e.g. "[24,-24]" or "[[None,3500],[4000,None]]"
    #[arg(short, long)]
    pub trims: Option<String>,

    /// Total number of frames in the source (default: probed from the container)
    #[arg(short = 'n', long)]
    pub frame_count: Option<u64>,

    /// Frame rate, e.g. 24000/1001 (default: probed, else 24000/1001)
    #[arg(short = 'r', long)]
    pub frame_rate: Option<String>,

    /// Disable FLAC encoding
    #[arg(long)]
    pub no_flac: bool,

    /// Disable AAC encoding
    #[arg(long)]
    pub no_aac: bool,

    /// Keep intermediate WAV files
    #[arg(long)]
    pub no_cleanup: bool,

    /// Show the output of eac3to, flac, and qaac
    #[arg(short, long)]
    pub verbose: bool,

    /// FLAC compression level (0-8)
    #[arg(long, default_value = "8", value_parser = flac_level)]
    pub flac_level: u8,

    /// qaac true VBR quality (0-127)
    #[arg(long, default_value = "127", value_parser = aac_quality)]
    pub aac_quality: u8,
}

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Input container or audio file
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments for the playlist command
#[derive(Args, Debug)]
pub struct PlaylistArgs {
    /// Pre-parsed playlist mapping as JSON: {"clip": ["...", "..."]}
    #[arg(short, long)]
    pub playlist: PathBuf,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input media file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the tools command
#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the script command
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Source clip the script will load
    #[arg(short, long)]
    pub source: PathBuf,

    /// Where to write the script (default: {source}.vpy next to the source)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Downscale resolution width
    #[arg(short = 'W', long, default_value = "1280")]
    pub width: u32,

    /// Downscale resolution height
    #[arg(short = 'H', long, default_value = "720")]
    pub height: u32,

    /// Masking threshold against 8-bit range
    #[arg(long, default_value = "10")]
    pub thr: u32,

    /// Descale kernel (bilinear, bicubic, lanczos, ...); a leading "de" is stripped
    #[arg(short, long, default_value = "bilinear")]
    pub kernel: String,

    /// Bicubic b coefficient
    #[arg(short, long, default_value = "0.3333333333333333")]
    pub b: f64,

    /// Bicubic c coefficient
    #[arg(short, long, default_value = "0.3333333333333333")]
    pub c: f64,

    /// Lanczos tap count
    #[arg(long, default_value = "3")]
    pub taps: u32,

    /// Number of times to expand the difference mask
    #[arg(long, default_value = "3")]
    pub expand: u32,

    /// Number of times to inflate the difference mask
    #[arg(long, default_value = "3")]
    pub inflate: u32,

    /// Output the mask instead of the filtered clip
    #[arg(long)]
    pub showmask: bool,

    /// Run the script through vspipe after writing it
    #[arg(long)]
    pub run: bool,
}

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Directory to sweep for leftover intermediate WAVs
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Report matches without removing anything
    #[arg(long)]
    pub dry_run: bool,
}
