//! AudioCut CLI
//!
//! A command-line tool for a fan-encoding post-processing workflow: pulling
//! audio tracks out of containers, trimming them losslessly to frame-accurate
//! boundaries, concatenating multi-part sources, and encoding to FLAC/AAC.
//! All heavy lifting is delegated to external tools (eac3to, ffmpeg, sox,
//! flac, qaac); a companion command generates VapourSynth rescale scripts.
//!
//! # Usage
//!
//! ```bash
//! audiocut process --input ep01.m2ts --trims "[24,-24]"
//! audiocut playlist --playlist 00001.json --trims "[[None,3500],[4000,None]]"
//! audiocut inspect --input ep01.m2ts
//! audiocut script --source ep01.mkv --kernel debicubic -b 0 -c 0.5
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use audiocut_cli::cli::{commands, Cli, Commands};
use audiocut_cli::config::Config;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let cli = Cli::parse();

    let config = Config::discover(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Process(args) => {
            info!("Executing process command");
            commands::process(args, config)?;
        }
        Commands::Playlist(args) => {
            info!("Executing playlist command");
            commands::playlist(args, config)?;
        }
        Commands::Inspect(args) => {
            commands::inspect(args, config)?;
        }
        Commands::Tools(args) => {
            commands::tools(args)?;
        }
        Commands::Script(args) => {
            commands::script(args, config)?;
        }
        Commands::Clean(args) => {
            commands::clean(args)?;
        }
    }

    Ok(())
}
