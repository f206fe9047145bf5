//! Encoder invocation: flac for lossless, qaac for AAC
//!
//! Argument shapes follow the encoders' conventions: `flac <in> -8 --force -o
//! <out>` and `qaac <in> --adts -V 127 --no-delay -o <out>`; `--silent` is
//! appended to either unless verbose output was requested.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::config::Config;
use crate::error::{AudioCutError, AudioCutResult};
use crate::tools;
use crate::utils::path::with_extension;

/// Highest (and default) FLAC compression level
pub const MAX_FLAC_LEVEL: u8 = 8;
/// Highest (and default) qaac true VBR quality
pub const MAX_AAC_QUALITY: u8 = 127;

fn run_encoder(tool: &'static str, path: &Path, args: Vec<OsString>) -> AudioCutResult<()> {
    let output = Command::new(path).args(args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AudioCutError::tool_not_found(tool)
        } else {
            AudioCutError::IoError(e)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AudioCutError::tool_failed(tool, stderr.trim().to_string()));
    }

    Ok(())
}

/// FLAC encoder wrapper
pub struct FlacEncoder {
    path: PathBuf,
    level: u8,
    verbose: bool,
}

impl FlacEncoder {
    /// Create an encoder from an explicit flac path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            level: MAX_FLAC_LEVEL,
            verbose: false,
        }
    }

    /// Locate flac via config override or PATH
    pub fn from_config(config: &Config) -> AudioCutResult<Self> {
        let path = tools::get_tool_path("flac", config.tool_override("flac"))?;
        Ok(Self::new(path))
    }

    /// Set the compression level (clamped to 0-8)
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.min(MAX_FLAC_LEVEL);
        self
    }

    /// Show encoder output on the console
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Output path for an input WAV
    pub fn output_path(input: &Path) -> PathBuf {
        with_extension(input, "flac")
    }

    /// Build the argument list for one encode
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![input.into(), format!("-{}", self.level).into()];
        if !self.verbose {
            args.push("--silent".into());
        }
        args.push("--force".into());
        args.push("-o".into());
        args.push(output.into());
        args
    }

    /// Encode one WAV, returning the FLAC path
    pub fn encode(&self, input: &Path) -> AudioCutResult<PathBuf> {
        let output = Self::output_path(input);
        info!("Encoding {} -> {}", input.display(), output.display());
        run_encoder("flac", &self.path, self.args(input, &output))?;
        Ok(output)
    }

    /// Encode a batch of WAVs in order
    pub fn encode_all(&self, inputs: &[PathBuf]) -> AudioCutResult<Vec<PathBuf>> {
        inputs.iter().map(|input| self.encode(input)).collect()
    }
}

/// qaac AAC encoder wrapper
pub struct AacEncoder {
    path: PathBuf,
    quality: u8,
    verbose: bool,
}

impl AacEncoder {
    /// Create an encoder from an explicit qaac path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quality: MAX_AAC_QUALITY,
            verbose: false,
        }
    }

    /// Locate qaac via config override or PATH
    pub fn from_config(config: &Config) -> AudioCutResult<Self> {
        let path = tools::get_tool_path("qaac", config.tool_override("qaac"))?;
        Ok(Self::new(path))
    }

    /// Set the true VBR quality (clamped to 0-127)
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(MAX_AAC_QUALITY);
        self
    }

    /// Show encoder output on the console
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Output path for an input WAV
    pub fn output_path(input: &Path) -> PathBuf {
        with_extension(input, "aac")
    }

    /// Build the argument list for one encode
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            input.into(),
            "--adts".into(),
            "-V".into(),
            self.quality.to_string().into(),
            "--no-delay".into(),
        ];
        if !self.verbose {
            args.push("--silent".into());
        }
        args.push("-o".into());
        args.push(output.into());
        args
    }

    /// Encode one WAV, returning the ADTS AAC path
    pub fn encode(&self, input: &Path) -> AudioCutResult<PathBuf> {
        let output = Self::output_path(input);
        info!("Encoding {} -> {}", input.display(), output.display());
        run_encoder("qaac", &self.path, self.args(input, &output))?;
        Ok(output)
    }

    /// Encode a batch of WAVs in order
    pub fn encode_all(&self, inputs: &[PathBuf]) -> AudioCutResult<Vec<PathBuf>> {
        inputs.iter().map(|input| self.encode(input)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_flac_args_silent_default() {
        let encoder = FlacEncoder::new("flac");
        let args = encoder.args(Path::new("a_cut.wav"), Path::new("a_cut.flac"));
        assert_eq!(
            to_strings(args),
            vec!["a_cut.wav", "-8", "--silent", "--force", "-o", "a_cut.flac"]
        );
    }

    #[test]
    fn test_flac_args_verbose_and_level() {
        let encoder = FlacEncoder::new("flac").with_level(5).with_verbose(true);
        let args = encoder.args(Path::new("a.wav"), Path::new("a.flac"));
        assert_eq!(
            to_strings(args),
            vec!["a.wav", "-5", "--force", "-o", "a.flac"]
        );
    }

    #[test]
    fn test_flac_level_clamped() {
        let encoder = FlacEncoder::new("flac").with_level(200);
        let args = encoder.args(Path::new("a.wav"), Path::new("a.flac"));
        assert_eq!(args[1], OsString::from("-8"));
    }

    #[test]
    fn test_aac_args_silent_default() {
        let encoder = AacEncoder::new("qaac");
        let args = encoder.args(Path::new("a_cut.wav"), Path::new("a_cut.aac"));
        assert_eq!(
            to_strings(args),
            vec![
                "a_cut.wav",
                "--adts",
                "-V",
                "127",
                "--no-delay",
                "--silent",
                "-o",
                "a_cut.aac"
            ]
        );
    }

    #[test]
    fn test_aac_args_verbose_and_quality() {
        let encoder = AacEncoder::new("qaac").with_quality(91).with_verbose(true);
        let args = encoder.args(Path::new("a.wav"), Path::new("a.aac"));
        assert_eq!(
            to_strings(args),
            vec![
                "a.wav", "--adts", "-V", "91", "--no-delay", "-o", "a.aac"
            ]
        );
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(
            FlacEncoder::output_path(Path::new("/enc/ep01_2_cut.wav")),
            PathBuf::from("/enc/ep01_2_cut.flac")
        );
        assert_eq!(
            AacEncoder::output_path(Path::new("/enc/ep01_2_cut.wav")),
            PathBuf::from("/enc/ep01_2_cut.aac")
        );
    }
}
