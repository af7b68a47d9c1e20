//! pdf-autocrop - Crop blank margins from PDF pages
//!
//! CLI entry point

use anyhow::Context;
use clap::Parser;
use pdf_autocrop::{
    exit_codes,
    // CLI
    Cli, Commands, CropArgs,
    // Config
    Config, ConfigError,
    // Crop
    AutoCropper,
    // Document
    DocumentError, PdfDocument,
    // Output & progress
    resolve_output_path, OutputMode, ProgressTracker,
    // Render
    PopplerRenderer, RenderError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Crop(args) => {
            init_logging(args.verbose, args.quiet);
            run_crop(&args)
        }
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    });
}

/// Map a failure to the process exit code
fn exit_code_for(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<DocumentError>() {
            return match e {
                DocumentError::Write { .. } => exit_codes::OUTPUT_ERROR,
                _ => exit_codes::GENERAL_ERROR,
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return exit_codes::INVALID_ARGS;
        }
    }
    exit_codes::GENERAL_ERROR
}

/// Install the stderr subscriber; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pdf_autocrop={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

// ============ Crop Command ============

fn run_crop(args: &CropArgs) -> anyhow::Result<()> {
    // Validate input path
    if !args.input.is_file() {
        eprintln!("Error: Input file does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    // An explicit config file must load; the default search falls back quietly
    let file_config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring config file");
            Config::default()
        }),
    };

    // Merge config file with CLI arguments (CLI takes precedence)
    let config = file_config.merge_with_cli(&args.overrides());
    tracing::debug!(?config, "effective configuration");

    let renderer = match &config.pdftoppm {
        Some(binary) => PopplerRenderer::with_binary(binary),
        None => PopplerRenderer::locate(),
    }
    .map_err(|e| match e {
        RenderError::ToolNotFound(name) => anyhow::anyhow!(
            "{} not found; install Poppler (poppler-utils) or pass --pdftoppm",
            name
        ),
        other => other.into(),
    })?
    .antialias(config.antialias);

    let mut doc = PdfDocument::load(&args.input)?;
    let output = resolve_output_path(
        &args.input,
        args.output.as_deref(),
        args.in_place,
        &config.output_prefix,
        &chrono::Local::now(),
    );

    // JSON goes to stdout alone
    let mode = if args.json {
        OutputMode::Quiet
    } else {
        OutputMode::from_flags(args.verbose, args.quiet)
    };
    let tracker = ProgressTracker::new(mode);
    tracker.start_file(&args.input.display().to_string());

    let cropper = AutoCropper::new(renderer, config.crop_options());
    let report = cropper
        .crop_document_with_progress(&mut doc, &tracker)
        .with_context(|| format!("cropping {}", args.input.display()))?;

    doc.save(&output)?;
    tracing::info!(path = %output.display(), "saved cropped document");

    if args.json {
        let mut json = report.to_json();
        json["output"] = serde_json::Value::from(output.display().to_string());
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else if mode.should_show(OutputMode::Normal) {
        ProgressTracker::print_summary(&report, Some(&output));
    }

    Ok(())
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("pdf-autocrop v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // System Information
    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);
    println!("  CPUs: {}", num_cpus::get());

    // Renderer
    println!();
    println!("Renderer:");
    match PopplerRenderer::locate() {
        Ok(renderer) => {
            let version = renderer.version().unwrap_or_else(|| "unknown version".into());
            println!("  Poppler: {} ({})", renderer.binary().display(), version);
        }
        Err(_) => println!("  Poppler: pdftoppm not found"),
    }

    // Config File Locations
    println!();
    println!("Config File Locations:");
    for path in Config::search_paths() {
        let state = if path.is_file() { "found" } else { "absent" };
        println!("  {} ({})", path.display(), state);
    }

    Ok(())
}
