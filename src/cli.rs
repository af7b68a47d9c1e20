//! CLI argument definitions

use crate::config::CliOverrides;
use crate::margin::Margins;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_ARGS: i32 = 2;
    pub const INPUT_NOT_FOUND: i32 = 3;
    pub const OUTPUT_ERROR: i32 = 4;
}

/// Crop blank margins from PDF pages
#[derive(Debug, Parser)]
#[command(name = "pdf-autocrop", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Crop every page of a PDF to its content
    Crop(CropArgs),
    /// Show environment and renderer information
    Info,
}

#[derive(Debug, Args)]
pub struct CropArgs {
    /// Input PDF file
    pub input: PathBuf,

    /// Output PDF file (default: timestamped file next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Padding above the content
    #[arg(short = 't', long, value_name = "N")]
    pub top: Option<u32>,

    /// Padding left of the content
    #[arg(short = 'l', long, value_name = "N")]
    pub left: Option<u32>,

    /// Padding below the content
    #[arg(short = 'b', long, value_name = "N")]
    pub bottom: Option<u32>,

    /// Padding right of the content
    #[arg(short = 'r', long, value_name = "N")]
    pub right: Option<u32>,

    /// Padding as up to four values: top left bottom right
    #[arg(
        short = 'm',
        long = "margins",
        value_name = "N",
        num_args = 1..=4,
        conflicts_with_all = ["top", "left", "bottom", "right"]
    )]
    pub margins: Option<Vec<u32>>,

    /// Overwrite the input file
    #[arg(long, conflicts_with = "output")]
    pub in_place: bool,

    /// Render pages in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Thread count for --parallel (default: all cores)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Path to pdftoppm
    #[arg(long, value_name = "PATH")]
    pub pdftoppm: Option<PathBuf>,

    /// Config file (default: ./pdf-autocrop.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the crop report as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and summary output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CropArgs {
    /// Margins given on the command line, if any.
    ///
    /// Per-side flags default missing sides to zero.
    pub fn effective_margins(&self) -> Option<Margins> {
        if let Some(values) = &self.margins {
            return Some(Margins::from_values(values));
        }
        let sides = [self.top, self.left, self.bottom, self.right];
        if sides.iter().all(Option::is_none) {
            return None;
        }
        Some(Margins::new(
            self.top.unwrap_or(0),
            self.left.unwrap_or(0),
            self.bottom.unwrap_or(0),
            self.right.unwrap_or(0),
        ))
    }

    /// Values that override the config file
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            margins: self.effective_margins(),
            parallel: self.parallel.then_some(true),
            threads: self.threads,
            pdftoppm: self.pdftoppm.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn try_parse_crop(args: &[&str]) -> Result<Cli, clap::Error> {
        let argv = ["pdf-autocrop", "crop"].iter().chain(args).copied();
        Cli::try_parse_from(argv)
    }

    fn parse_crop(args: &[&str]) -> CropArgs {
        match try_parse_crop(args).unwrap().command {
            Commands::Crop(args) => args,
            Commands::Info => panic!("expected crop"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_minimal_crop() {
        let args = parse_crop(&["in.pdf"]);
        assert_eq!(args.input, PathBuf::from("in.pdf"));
        assert!(args.output.is_none());
        assert!(args.effective_margins().is_none());
        assert!(!args.in_place);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_per_side_margins() {
        let args = parse_crop(&["in.pdf", "-t", "10", "-r", "4"]);
        assert_eq!(args.effective_margins(), Some(Margins::new(10, 0, 0, 4)));
    }

    #[test]
    fn test_margin_list_padded_with_zeros() {
        let args = parse_crop(&["in.pdf", "-m", "1", "2"]);
        assert_eq!(args.effective_margins(), Some(Margins::new(1, 2, 0, 0)));

        let args = parse_crop(&["in.pdf", "--margins", "1", "2", "3", "4"]);
        assert_eq!(args.effective_margins(), Some(Margins::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_margin_list_conflicts_with_sides() {
        assert!(try_parse_crop(&["in.pdf", "-m", "1", "-t", "2"]).is_err());
    }

    #[test]
    fn test_too_many_margin_values() {
        let result = try_parse_crop(&["in.pdf", "-m", "1", "2", "3", "4", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_margin_rejected() {
        assert!(try_parse_crop(&["in.pdf", "--top=-3"]).is_err());
    }

    #[test]
    fn test_in_place_conflicts_with_output() {
        let result = try_parse_crop(&["in.pdf", "--in-place", "-o", "x.pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let args = parse_crop(&["in.pdf", "--parallel", "--threads", "3", "-vv"]);
        let overrides = args.overrides();
        assert_eq!(overrides.parallel, Some(true));
        assert_eq!(overrides.threads, Some(3));
        assert!(overrides.margins.is_none());
        assert_eq!(args.verbose, 2);

        // Absent flag leaves the config file value alone
        let args = parse_crop(&["in.pdf"]);
        assert_eq!(args.overrides().parallel, None);
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::try_parse_from(["pdf-autocrop", "info"]).unwrap();
        assert!(matches!(cli.command, Commands::Info));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            exit_codes::SUCCESS,
            exit_codes::GENERAL_ERROR,
            exit_codes::INVALID_ARGS,
            exit_codes::INPUT_NOT_FOUND,
            exit_codes::OUTPUT_ERROR,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
