//! Poppler (`pdftoppm`) renderer
//!
//! Runs `pdftoppm` once per page into a scratch directory and decodes the
//! resulting PNG.

use super::{PageRenderer, RenderError, Result};
use image::RgbaImage;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Executable name looked up on `PATH` by default
pub const DEFAULT_PDFTOPPM: &str = "pdftoppm";

/// File stem given to `pdftoppm -singlefile`
const OUTPUT_STEM: &str = "page";

/// Renderer backed by Poppler's `pdftoppm`
#[derive(Debug, Clone)]
pub struct PopplerRenderer {
    binary: PathBuf,
    antialias: bool,
}

impl PopplerRenderer {
    /// Find `pdftoppm` on `PATH`
    pub fn locate() -> Result<Self> {
        Self::with_binary(DEFAULT_PDFTOPPM)
    }

    /// Use a specific executable (name on `PATH` or explicit path)
    pub fn with_binary(binary: impl AsRef<std::ffi::OsStr>) -> Result<Self> {
        let binary = binary.as_ref();
        let resolved = which::which(binary)
            .map_err(|_| RenderError::ToolNotFound(binary.to_string_lossy().into_owned()))?;
        Ok(Self {
            binary: resolved,
            antialias: true,
        })
    }

    /// Toggle font and vector anti-aliasing (on by default)
    #[must_use]
    pub fn antialias(mut self, enabled: bool) -> Self {
        self.antialias = enabled;
        self
    }

    /// Resolved executable path
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Version line reported by the executable, if it reports one
    pub fn version(&self) -> Option<String> {
        let output = Command::new(&self.binary).arg("-v").output().ok()?;
        // pdftoppm prints its banner on stderr
        let text = if output.stderr.is_empty() {
            output.stdout
        } else {
            output.stderr
        };
        String::from_utf8_lossy(&text)
            .lines()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
    }

    /// Arguments for one page; the output lands at `<prefix>.png`
    fn command_args(
        &self,
        source: &Path,
        page_number: u32,
        width: u32,
        height: u32,
        prefix: &Path,
    ) -> Vec<OsString> {
        let aa = if self.antialias { "yes" } else { "no" };
        let page = page_number.to_string();
        let width = width.to_string();
        let height = height.to_string();
        let mut args: Vec<OsString> = [
            "-png",
            "-singlefile",
            "-f",
            page.as_str(),
            "-l",
            page.as_str(),
            "-scale-to-x",
            width.as_str(),
            "-scale-to-y",
            height.as_str(),
            "-aa",
            aa,
            "-aaVector",
            aa,
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(source.as_os_str().to_owned());
        args.push(prefix.as_os_str().to_owned());
        args
    }
}

impl PageRenderer for PopplerRenderer {
    fn render(
        &self,
        source: &Path,
        page_number: u32,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyPage {
                page_number,
                width,
                height,
            });
        }

        let scratch = tempfile::tempdir()?;
        let prefix = scratch.path().join(OUTPUT_STEM);
        let args = self.command_args(source, page_number, width, height, &prefix);

        tracing::trace!(binary = %self.binary.display(), ?args, "running renderer");
        let output = Command::new(&self.binary).args(&args).output()?;
        if !output.status.success() {
            return Err(RenderError::CommandFailed {
                page_number,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let png = prefix.with_extension("png");
        if !png.exists() {
            return Err(RenderError::MissingOutput(png));
        }

        let raster = image::open(&png)
            .map_err(|e| RenderError::InvalidImage(e.to_string()))?
            .to_rgba8();
        Ok(raster)
    }
}
