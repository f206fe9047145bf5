//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{CleanArgs, InspectArgs, PlaylistArgs, ProcessArgs, ScriptArgs, ToolsArgs};

/// AudioCut command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "audiocut",
    version,
    about = "Frame-accurate audio extraction, trimming, and encoding",
    long_about = "Extracts audio tracks from containers, losslessly trims them to \
                  frame-accurate boundaries, concatenates multi-part sources, and \
                  encodes to FLAC/AAC by orchestrating eac3to, ffmpeg, sox, flac, \
                  and qaac."
)]
pub struct Cli {
    /// Config file with tool paths and defaults
    #[arg(long, global = true, env = "AUDIOCUT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract, trim, and encode the audio of a container file
    Process(ProcessArgs),
    /// Extract, concatenate, trim, and encode a multi-part playlist
    Playlist(PlaylistArgs),
    /// Probe a media file and display its stream layout
    Inspect(InspectArgs),
    /// Check which external tools are available
    Tools(ToolsArgs),
    /// Generate a VapourSynth line-art rescale script
    Script(ScriptArgs),
    /// Remove leftover intermediate WAV files from a directory tree
    Clean(CleanArgs),
}
