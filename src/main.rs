use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use regionpaths::config::FileConfig;
use regionpaths::diagnostics::{CoordinatePolicy, Diagnostics};
use regionpaths::input::{ParseOptions, read_collection};
use regionpaths::output::{OutputDocument, OutputFormat, render, write_output};
use regionpaths::pipeline::{BuildSettings, BuildSummary, ExtentSource, build_region_shapes};

/// Generate precomputed SVG path data for region boundaries from GeoJSON
///
/// Examples:
///   # California counties with the built-in extent and region table
///   regionpaths
///
///   # Another dataset, fitting the viewbox to the data itself
///   regionpaths -i states.geojson -o src/data/states.ts --fit-extent
///
///   # JSON output, failing on any malformed coordinate
///   regionpaths -o shapes.json --strict
///
///   # Use a config file
///   regionpaths --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "regionpaths")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches regionpaths.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input GeoJSON feature collection
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output file path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format (defaults to the output file extension, then typescript)
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Viewbox width
    #[arg(long)]
    width: Option<f64>,

    /// Viewbox height
    #[arg(long)]
    height: Option<f64>,

    /// Simplification tolerance for the detailed path
    #[arg(long)]
    detailed_tolerance: Option<f64>,

    /// Simplification tolerance for the default path
    #[arg(long)]
    simplified_tolerance: Option<f64>,

    /// Fail on malformed coordinates instead of mapping them to the origin
    #[arg(long)]
    strict: bool,

    /// Fit the viewbox to the input's own bounds instead of the configured extent
    #[arg(long)]
    fit_extent: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = match args.config {
        Some(ref path) => FileConfig::from_path(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let verbose = args.verbose || file_config.verbose;
    setup_logging(verbose)?;

    let input = args.input.clone().unwrap_or(file_config.input.clone());
    let output = args.output.clone().unwrap_or(file_config.output.clone());
    let format = args
        .format
        .or(file_config.format)
        .or_else(|| OutputFormat::from_path(&output))
        .unwrap_or_default();
    let policy = CoordinatePolicy::from_strict(args.strict || file_config.strict);
    let extent = if args.fit_extent || file_config.fit_extent {
        ExtentSource::FitInput
    } else {
        ExtentSource::Fixed(file_config.extent)
    };

    let settings = BuildSettings {
        width: args.width.unwrap_or(file_config.width),
        height: args.height.unwrap_or(file_config.height),
        padding: file_config.padding,
        extent,
        detailed_tolerance: args
            .detailed_tolerance
            .unwrap_or(file_config.detailed_tolerance),
        simplified_tolerance: args
            .simplified_tolerance
            .unwrap_or(file_config.simplified_tolerance),
    };
    validate_settings(&settings)?;

    let parse_options = ParseOptions {
        name_property: file_config.name_property.clone(),
        code_property: file_config.code_property.clone(),
        policy,
    };
    let regions = file_config.region_table();

    println!("regionpaths - Region Path Generator");
    println!("===================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", input.display());
        println!("  Output: {} ({:?})", output.display(), format);
        println!("  Viewbox: {} x {}", settings.width, settings.height);
        println!("  Padding: {:.0}%", settings.padding * 100.0);
        println!("  Extent: {:?}", settings.extent);
        println!(
            "  Tolerances: detailed {}, simplified {}",
            settings.detailed_tolerance, settings.simplified_tolerance
        );
        println!("  Coordinate policy: {:?}", policy);
        println!("  Region table: {} entries", regions.len());
        println!();
    }

    let mut diagnostics = Diagnostics::new();

    let spinner = create_spinner("Reading features...");
    let start = Instant::now();
    let features = read_collection(&input, &parse_options, &mut diagnostics)?;
    spinner.finish_with_message(format!(
        "Read {} features from {} [{:.1}s]",
        features.len(),
        input.display(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Simplifying and projecting boundaries...");
    let start = Instant::now();
    let shapes = build_region_shapes(&features, &settings, &regions, &mut diagnostics);
    spinner.finish_with_message(format!(
        "Built {} region shapes [{:.1}s]",
        shapes.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Writing output...");
    let start = Instant::now();
    let source = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let doc = OutputDocument {
        source: &source,
        shapes: &shapes,
        regions: &regions,
    };
    let contents = render(&doc, format, &file_config.typescript)?;
    write_output(&output, &contents).context("Failed to write generated shapes")?;
    spinner.finish_with_message(format!(
        "Wrote {:.1} KB [{:.1}s]",
        contents.len() as f64 / 1024.0,
        start.elapsed().as_secs_f32()
    ));

    let summary = BuildSummary::from_shapes(&shapes);
    info!("{}", diagnostics.summary());

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output.display());
    println!("Total records: {}", summary.records);
    println!(
        "Average points per record (original): {:.0}",
        summary.average_original_points
    );
    println!(
        "Sample simplified path length: {} characters",
        summary.sample_path_len
    );
    if !diagnostics.is_empty() {
        println!("Warnings: {}", diagnostics.summary());
    }

    Ok(())
}

fn validate_settings(settings: &BuildSettings) -> Result<()> {
    if !(settings.width > 0.0 && settings.height > 0.0) {
        bail!(
            "Viewbox must be positive, got {} x {}",
            settings.width,
            settings.height
        );
    }
    if !(0.0..1.0).contains(&settings.padding) {
        bail!("Padding must be in [0, 1), got {}", settings.padding);
    }
    if settings.detailed_tolerance < 0.0 || settings.simplified_tolerance < 0.0 {
        bail!("Simplification tolerances must not be negative");
    }
    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
