//! Thin binding over the sox command line for sample-accurate WAV editing
//!
//! Two invocation shapes are used: `sox in.wav out.wav trim <start> =<end>`
//! for trimming (the `=` marks an absolute position rather than a length),
//! and `sox --combine concatenate in1.wav in2.wav ... out.wav` for joining.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::Config;
use crate::error::{AudioCutError, AudioCutResult};
use crate::tools;

/// Format a position in seconds the way sox expects it
fn format_seconds(seconds: f64) -> String {
    format!("{:.6}", seconds)
}

/// Handle to the sox binary
pub struct Sox {
    path: PathBuf,
}

impl Sox {
    /// Create a handle from an explicit sox path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate sox via config override or PATH
    pub fn from_config(config: &Config) -> AudioCutResult<Self> {
        let path = tools::get_tool_path("sox", config.tool_override("sox"))?;
        Ok(Self::new(path))
    }

    /// Build the argument list for a trim invocation
    pub fn trim_args(input: &Path, output: &Path, start: f64, end: f64) -> Vec<OsString> {
        vec![
            input.into(),
            output.into(),
            "trim".into(),
            format_seconds(start).into(),
            format!("={}", format_seconds(end)).into(),
        ]
    }

    /// Build the argument list for a concatenate invocation
    pub fn concat_args(inputs: &[PathBuf], output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--combine".into(), "concatenate".into()];
        args.extend(inputs.iter().map(OsString::from));
        args.push(output.into());
        args
    }

    /// Trim `input` to the absolute time window `[start, end)` seconds
    pub fn trim(&self, input: &Path, output: &Path, start: f64, end: f64) -> AudioCutResult<()> {
        debug!(
            "sox trim {} -> {} [{:.6}, {:.6}]",
            input.display(),
            output.display(),
            start,
            end
        );
        self.run(Self::trim_args(input, output, start, end))
    }

    /// Concatenate `inputs` into `output`
    pub fn concatenate(&self, inputs: &[PathBuf], output: &Path) -> AudioCutResult<()> {
        debug!(
            "sox concatenate {} inputs -> {}",
            inputs.len(),
            output.display()
        );
        self.run(Self::concat_args(inputs, output))
    }

    fn run(&self, args: Vec<OsString>) -> AudioCutResult<()> {
        let output = Command::new(&self.path).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AudioCutError::tool_not_found("sox")
            } else {
                AudioCutError::IoError(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioCutError::tool_failed("sox", stderr.trim().to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_args() {
        let args = Sox::trim_args(
            Path::new("in.wav"),
            Path::new("out.wav"),
            1.001,
            41.708292,
        );
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["in.wav", "out.wav", "trim", "1.001000", "=41.708292"]
        );
    }

    #[test]
    fn test_trim_args_from_zero() {
        let args = Sox::trim_args(Path::new("a.wav"), Path::new("b.wav"), 0.0, 0.5);
        assert_eq!(args[3], OsString::from("0.000000"));
        assert_eq!(args[4], OsString::from("=0.500000"));
    }

    #[test]
    fn test_concat_args() {
        let inputs = vec![PathBuf::from("a_temp1.wav"), PathBuf::from("a_temp2.wav")];
        let args = Sox::concat_args(&inputs, Path::new("a_cut.wav"));
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "--combine",
                "concatenate",
                "a_temp1.wav",
                "a_temp2.wav",
                "a_cut.wav"
            ]
        );
    }

    #[test]
    fn test_missing_binary_maps_to_tool_not_found() {
        let sox = Sox::new("/no/such/sox_12345");
        let err = sox
            .trim(Path::new("a.wav"), Path::new("b.wav"), 0.0, 1.0)
            .unwrap_err();
        assert!(matches!(err, AudioCutError::ToolNotFound { .. }));
    }
}
