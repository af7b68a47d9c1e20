//! Progress tracking module for document cropping.
//!
//! Draws a page progress bar on stderr and prints per-page and final
//! summaries according to the selected verbosity.

use crate::crop::{CropProgress, CropReport, PageOutcome};
use indicatif::{ProgressBar, ProgressStyle};

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// No output
    Quiet,
    /// Normal output (progress bar and summary)
    #[default]
    Normal,
    /// Verbose output (one line per page)
    Verbose,
    /// Very verbose (per-page detection detail)
    VeryVerbose,
}

impl OutputMode {
    /// Create OutputMode from verbosity level
    pub fn from_verbosity(level: u8) -> Self {
        match level {
            0 => OutputMode::Normal,
            1 => OutputMode::Verbose,
            _ => OutputMode::VeryVerbose,
        }
    }

    /// Quiet wins over any verbosity
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            OutputMode::Quiet
        } else {
            Self::from_verbosity(verbose)
        }
    }

    /// Check if output should be shown at this mode
    pub fn should_show(&self, required: OutputMode) -> bool {
        use OutputMode::*;
        match (self, required) {
            (Quiet, _) => false,
            (Normal, Quiet | Normal) => true,
            (Verbose, Quiet | Normal | Verbose) => true,
            (VeryVerbose, _) => true,
            _ => false,
        }
    }
}

/// Progress bar template
const BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pages {msg}";

/// One line describing a finished page
pub fn format_page_line(outcome: &PageOutcome, mode: OutputMode) -> String {
    match outcome {
        PageOutcome::Cropped {
            page_number,
            plan,
            media_box,
        } => {
            let mut line = format!(
                "  Page {:>4}: cropped to {:.0}x{:.0} at ({:.0}, {:.0})",
                page_number,
                media_box.width(),
                media_box.height(),
                media_box.llx,
                media_box.lly
            );
            if plan.bounds.is_degenerate() {
                line.push_str(" [no content]");
            }
            if mode.should_show(OutputMode::VeryVerbose) {
                let d = plan.detected;
                line.push_str(&format!(
                    " detected top={} left={} bottom={} right={} raster={}x{}",
                    d.top, d.left, d.bottom, d.right, plan.raster_size.0, plan.raster_size.1
                ));
            }
            line
        }
        PageOutcome::Skipped {
            page_number,
            reason,
        } => format!("  Page {:>4}: skipped ({})", page_number, reason),
    }
}

/// Progress tracker for document cropping
pub struct ProgressTracker {
    bar: ProgressBar,
    output_mode: OutputMode,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(OutputMode::Normal)
    }
}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new(output_mode: OutputMode) -> Self {
        let bar = if output_mode.should_show(OutputMode::Normal) {
            let bar = ProgressBar::new(0);
            if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            output_mode,
        }
    }

    /// Print the file header
    pub fn start_file(&self, filename: &str) {
        if self.output_mode.should_show(OutputMode::Normal) {
            self.bar.println("=".repeat(80));
            self.bar.println(format!("[Crop] {}", filename));
            self.bar.println("=".repeat(80));
        }
    }

    /// Print final summary
    pub fn print_summary(report: &CropReport, output: Option<&std::path::Path>) {
        println!();
        println!("{}", "=".repeat(80));
        println!("Crop Summary");
        println!("{}", "=".repeat(80));
        println!("  Total pages:  {}", report.page_count());
        println!("  Cropped:      {}", report.cropped_count());
        println!("  Skipped:      {}", report.skipped_count());
        println!("  Elapsed:      {:.2}s", report.elapsed_seconds);
        if let Some(output) = output {
            println!("  Output:       {}", output.display());
        }
        println!("{}", "=".repeat(80));
        println!();
    }
}

impl CropProgress for ProgressTracker {
    fn on_start(&self, total_pages: usize) {
        self.bar.set_length(total_pages as u64);
        self.bar.set_position(0);
    }

    fn on_page_planned(&self, _page_number: u32) {
        self.bar.inc(1);
    }

    fn on_page_done(&self, outcome: &PageOutcome) {
        let skipped = !outcome.is_cropped();
        // Skipped pages are worth a line even at normal verbosity
        if self.output_mode.should_show(OutputMode::Verbose)
            || (skipped && self.output_mode.should_show(OutputMode::Normal))
        {
            self.bar.println(format_page_line(outcome, self.output_mode));
        }
    }

    fn on_finish(&self, _report: &CropReport) {
        self.bar.finish_and_clear();
    }
}
