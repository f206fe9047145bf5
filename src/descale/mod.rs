//! VapourSynth script generation for the anti-aliased line-art rescale chain
//!
//! The chain downscales only lineart with an inverted kernel, interpolates it
//! back to the source resolution with NNEDI3, and protects native-resolution
//! detail (credits) behind a difference mask; chroma gets the same treatment
//! with a gauss kernel. All signal processing happens inside the VapourSynth
//! host: this module only renders the script and, on request, drives vspipe.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AudioCutError, AudioCutResult};
use crate::tools;

/// Parameters of the rescale chain
#[derive(Debug, Clone)]
pub struct DescaleAa {
    width: u32,
    height: u32,
    thr: u32,
    kernel: String,
    b: f64,
    c: f64,
    taps: u32,
    expand: u32,
    inflate: u32,
    showmask: bool,
}

impl Default for DescaleAa {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            thr: 10,
            kernel: "bilinear".to_string(),
            b: 1.0 / 3.0,
            c: 1.0 / 3.0,
            taps: 3,
            expand: 3,
            inflate: 3,
            showmask: false,
        }
    }
}

impl DescaleAa {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the downscale resolution
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the masking threshold (expressed against 8-bit range)
    pub fn with_threshold(mut self, thr: u32) -> Self {
        self.thr = thr;
        self
    }

    /// Set the descale kernel; a leading `de` is stripped, so `debilinear`
    /// selects the bilinear kernel
    pub fn with_kernel(mut self, kernel: impl Into<String>) -> Self {
        let kernel = kernel.into().to_lowercase();
        self.kernel = kernel
            .strip_prefix("de")
            .map(|k| k.to_string())
            .unwrap_or(kernel);
        self
    }

    /// Set the bicubic b/c coefficients
    pub fn with_bicubic(mut self, b: f64, c: f64) -> Self {
        self.b = b;
        self.c = c;
        self
    }

    /// Set the lanczos tap count
    pub fn with_taps(mut self, taps: u32) -> Self {
        self.taps = taps;
        self
    }

    /// Set the mask grow/inflate iteration counts
    pub fn with_mask_growth(mut self, expand: u32, inflate: u32) -> Self {
        self.expand = expand;
        self.inflate = inflate;
        self
    }

    /// Output the mask instead of the filtered clip
    pub fn with_showmask(mut self, showmask: bool) -> Self {
        self.showmask = showmask;
        self
    }

    /// The normalized kernel name
    pub fn kernel(&self) -> &str {
        &self.kernel
    }

    /// Render a self-contained VapourSynth script that loads `source` and
    /// applies the chain
    pub fn render_script(&self, source: &Path) -> String {
        let mut s = String::new();
        let kernel = &self.kernel;
        let (w, h, taps) = (self.width, self.height, self.taps);
        let (b, c) = (self.b, self.c);

        s.push_str("import vapoursynth as vs\n");
        s.push_str("import fvsfunc as fvf\n");
        s.push_str("import nnedi3_resample as nnrs\n\n");
        s.push_str("core = vs.core\n\n");

        let _ = writeln!(
            s,
            "src = core.lsmas.LWLibavSource(r\"{}\")\n",
            source.display()
        );

        s.push_str("ow = src.width\n");
        s.push_str("oh = src.height\n\n");

        // Scale the 8-bit threshold to the clip's sample format
        s.push_str("bits = src.format.bits_per_sample\n");
        s.push_str("if src.format.sample_type == vs.INTEGER:\n");
        let _ = writeln!(s, "    thr = {} * ((1 << bits) - 1) // 0xFF", self.thr);
        s.push_str("else:\n");
        let _ = writeln!(s, "    thr = {} / (235 - 16)", self.thr);
        s.push('\n');

        // Fix lineart
        s.push_str("src_y = core.std.ShufflePlanes(src, planes=0, colorfamily=vs.GRAY)\n");
        let _ = writeln!(
            s,
            "deb = fvf.Resize(src_y, {w}, {h}, kernel='{kernel}', a1={b}, a2={c}, taps={taps}, invks=True)"
        );
        s.push_str(
            "sharp = nnrs.nnedi3_resample(deb, ow, oh, invks=True, invkstaps=2, \
             kernel=\"bicubic\", a1=0.70, a2=0, nns=4, qual=2, pscrn=4)\n",
        );
        s.push_str("edgemask = core.std.Prewitt(sharp, planes=0)\n");
        if self.kernel == "bicubic" && self.c >= 0.7 {
            s.push_str("edgemask = core.std.Maximum(edgemask, planes=0)\n");
        }
        s.push_str("sharp = core.resize.Point(sharp, format=src.format.id)\n\n");

        // Restore native-resolution detail
        let _ = writeln!(
            s,
            "deb_upscale = fvf.Resize(deb, ow, oh, kernel='{kernel}', a1={b}, a2={c}, taps={taps})"
        );
        s.push_str("diffmask = core.std.Expr([src_y, deb_upscale], 'x y - abs')\n");
        let _ = writeln!(s, "for _ in range({}):", self.expand);
        s.push_str("    diffmask = core.std.Maximum(diffmask, planes=0)\n");
        let _ = writeln!(s, "for _ in range({}):", self.inflate);
        s.push_str("    diffmask = core.std.Inflate(diffmask, planes=0)\n\n");

        s.push_str(
            "mask = core.std.Expr([diffmask, edgemask], 'x {} >= 0 y ?'.format(thr))\n",
        );
        s.push_str("mask = mask.std.Inflate().std.Deflate()\n");
        s.push_str("out_y = core.std.MaskedMerge(src, sharp, mask, planes=0)\n\n");

        // Scale chroma
        s.push_str(
            "new_uv = nnrs.nnedi3_resample(src, ow, oh, invks=True, invkstaps=2, \
             kernel=\"gauss\", a1=30, nns=4, qual=2, pscrn=4, chromak_down=\"gauss\", \
             chromak_down_invks=True, chromak_down_invkstaps=2, chromak_down_taps=1, \
             chromak_down_a1=16)\n",
        );
        s.push_str("edgemask = core.std.Prewitt(new_uv, planes=0)\n");
        s.push_str("edgemask_uv = core.std.Invert(edgemask, planes=[0])\n\n");

        let _ = writeln!(
            s,
            "deb_upscale = fvf.Resize(src, ow, oh, kernel='{kernel}', a1={b}, a2={c}, taps={taps})"
        );
        s.push_str("diffmask = core.std.Expr([src, deb_upscale], 'x y - abs')\n");
        let _ = writeln!(s, "for _ in range({}):", self.expand);
        s.push_str("    diffmask = core.std.Maximum(diffmask, planes=0)\n");
        let _ = writeln!(s, "for _ in range({}):", self.inflate);
        s.push_str("    diffmask = core.std.Inflate(diffmask, planes=0)\n\n");

        s.push_str(
            "mask_uv = core.std.Expr([diffmask, edgemask_uv], 'x {} >= 0 y ?'.format(thr))\n",
        );
        s.push_str("mask_uv = mask_uv.std.Inflate().std.Deflate()\n");
        s.push_str("out_uv = core.std.MaskedMerge(src, new_uv, mask_uv, planes=[1, 2])\n\n");

        s.push_str(
            "out = core.std.ShufflePlanes([out_y, out_uv, out_uv], planes=[0, 1, 2], \
             colorfamily=vs.YUV)\n",
        );
        if self.showmask {
            s.push_str("out = mask\n");
        }
        s.push_str("out.set_output()\n");

        s
    }

    /// Write the rendered script to `output`
    pub fn write_script(&self, source: &Path, output: &Path) -> AudioCutResult<()> {
        let script = self.render_script(source);
        std::fs::write(output, script)?;
        info!("Wrote VapourSynth script to {}", output.display());
        Ok(())
    }

    /// Render the script to a temp file and run it through `vspipe -p <script> .`
    /// (render with progress, discard output)
    pub fn run(&self, source: &Path, config: &Config) -> AudioCutResult<()> {
        let vspipe = tools::get_tool_path("vspipe", config.tool_override("vspipe"))?;

        let mut file = tempfile::Builder::new()
            .prefix("audiocut-descale-")
            .suffix(".vpy")
            .tempfile()?;
        file.write_all(self.render_script(source).as_bytes())?;

        let script_path: PathBuf = file.path().to_path_buf();
        debug!("Running vspipe on {}", script_path.display());

        let output = Command::new(&vspipe)
            .arg("-p")
            .arg(&script_path)
            .arg(".")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AudioCutError::tool_not_found("vspipe")
                } else {
                    AudioCutError::IoError(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioCutError::tool_failed(
                "vspipe",
                stderr.trim().to_string(),
            ));
        }

        info!("vspipe run completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_prefix_stripped() {
        let aa = DescaleAa::new().with_kernel("debilinear");
        assert_eq!(aa.kernel(), "bilinear");

        let aa = DescaleAa::new().with_kernel("Lanczos");
        assert_eq!(aa.kernel(), "lanczos");
    }

    #[test]
    fn test_script_defaults() {
        let script = DescaleAa::new().render_script(Path::new("/enc/ep01.mkv"));

        assert!(script.contains("core.lsmas.LWLibavSource(r\"/enc/ep01.mkv\")"));
        assert!(script.contains("kernel='bilinear'"));
        assert!(script.contains("deb = fvf.Resize(src_y, 1280, 720,"));
        assert!(script.contains("thr = 10 * ((1 << bits) - 1) // 0xFF"));
        assert!(script.contains("nnrs.nnedi3_resample"));
        assert!(script.contains("out.set_output()"));
        // The bicubic-specific extra dilation is absent for bilinear
        assert!(!script.contains("edgemask = core.std.Maximum(edgemask, planes=0)"));
        // Filtered clip is the output, not the mask
        assert!(!script.contains("out = mask\n"));
    }

    #[test]
    fn test_script_sharp_bicubic_grows_edgemask() {
        let script = DescaleAa::new()
            .with_kernel("bicubic")
            .with_bicubic(0.0, 1.0)
            .render_script(Path::new("a.mkv"));
        assert!(script.contains("edgemask = core.std.Maximum(edgemask, planes=0)"));
    }

    #[test]
    fn test_script_soft_bicubic_keeps_edgemask() {
        let script = DescaleAa::new()
            .with_kernel("bicubic")
            .with_bicubic(0.33, 0.33)
            .render_script(Path::new("a.mkv"));
        assert!(!script.contains("edgemask = core.std.Maximum(edgemask, planes=0)"));
    }

    #[test]
    fn test_script_showmask() {
        let script = DescaleAa::new()
            .with_showmask(true)
            .render_script(Path::new("a.mkv"));
        assert!(script.contains("out = mask\n"));
    }

    #[test]
    fn test_write_script() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("rescale.vpy");
        DescaleAa::new()
            .with_resolution(1440, 810)
            .write_script(Path::new("a.mkv"), &out)
            .unwrap();

        let script = std::fs::read_to_string(&out).unwrap();
        assert!(script.contains("fvf.Resize(src_y, 1440, 810,"));
    }
}
