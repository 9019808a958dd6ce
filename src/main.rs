//! lasplot - LAS well-log inspection and multi-track plotting
//!
//! # Usage
//!
//! ```bash
//! # Curve listing, previews, missing data and statistics
//! lasplot inspect 1050383876.las
//! lasplot inspect 1050383876.las --json
//!
//! # All four figures next to the input: <stem>_<layout>.png
//! lasplot plot 1050383876.las
//!
//! # One figure as SVG
//! lasplot plot 1050383876.las --layout combo --output combo.svg
//!
//! # Fraction panel from config only
//! lasplot fraction-panel --top 1000 --base 3400 --output panel.png
//! ```
//!
//! # Environment Variables
//!
//! - `LASPLOT_CONFIG`: Path to a TOML config (default: ./lasplot.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use lasplot::config::PlotConfig;
use lasplot::las::LasFile;
use lasplot::pipeline::{self, InspectionReport};
use lasplot::plot::{render_to_file, LayoutKind, LogLayout, OutputFormat};
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "lasplot")]
#[command(about = "LAS well-log inspection and multi-track plotting")]
#[command(version)]
struct CliArgs {
    /// Config file (otherwise ./lasplot.toml, then defaults)
    #[arg(long, global = true, value_name = "PATH", env = "LASPLOT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Print curves, head/tail previews, missing-data counts and statistics
    Inspect {
        /// LAS file to read
        file: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render well-log figures from a LAS file
    Plot {
        /// LAS file to read
        file: PathBuf,
        /// Figure to draw
        #[arg(long, value_enum, default_value_t = LayoutArg::All)]
        layout: LayoutArg,
        /// Output file, or directory when drawing every layout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Image format (default: from the output extension, then config)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Render the standalone fraction panel from the config components
    FractionPanel {
        /// Output file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Shallowest sample depth
        #[arg(long, allow_negative_numbers = true)]
        top: Option<f64>,
        /// Deepest sample depth
        #[arg(long, allow_negative_numbers = true)]
        base: Option<f64>,
        /// Image format (default: from the output extension, then config)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LayoutArg {
    Logs,
    Overlay,
    Fraction,
    Combo,
    All,
}

impl LayoutArg {
    fn kinds(self) -> Vec<LayoutKind> {
        match self {
            LayoutArg::Logs => vec![LayoutKind::Logs],
            LayoutArg::Overlay => vec![LayoutKind::Overlay],
            LayoutArg::Fraction => vec![LayoutKind::FractionPanel],
            LayoutArg::Combo => vec![LayoutKind::Combo],
            LayoutArg::All => LayoutKind::ALL.to_vec(),
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
        }
    }
}

// ============================================================================
// Output Paths
// ============================================================================

/// Explicit flag, then the output extension, then the configured default.
fn resolve_format(
    explicit: Option<FormatArg>,
    output: Option<&Path>,
    configured: OutputFormat,
) -> OutputFormat {
    explicit
        .map(OutputFormat::from)
        .or_else(|| output.and_then(OutputFormat::from_path))
        .unwrap_or(configured)
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("well")
}

/// Where one figure goes. Several figures from one run get the layout name
/// appended so they don't overwrite each other.
fn output_path(
    output: Option<&Path>,
    stem: &str,
    kind: LayoutKind,
    format: OutputFormat,
    multiple: bool,
) -> PathBuf {
    let ext = format.extension();
    match output {
        Some(dir) if dir.is_dir() => dir.join(format!("{stem}_{kind}.{ext}")),
        Some(path) if !multiple => path.to_path_buf(),
        Some(path) => path.with_file_name(format!("{}_{kind}.{ext}", file_stem(path))),
        None => PathBuf::from(format!("{stem}_{kind}.{ext}")),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn read_las(path: &Path) -> Result<LasFile> {
    LasFile::read(path).with_context(|| format!("Failed to read LAS file {}", path.display()))
}

fn run_inspect(config: &PlotConfig, file: &Path, json: bool) -> Result<()> {
    let las = read_las(file)?;
    let loaded = las.to_frame()?;
    let prepared = pipeline::prepare_frame(&loaded, &config.processing)
        .with_context(|| format!("Failed to prepare logs from {}", file.display()))?;
    let report = InspectionReport::new(&las, &loaded, &prepared);

    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn run_plot(
    config: &PlotConfig,
    file: &Path,
    layout: LayoutArg,
    output: Option<&Path>,
    format: Option<FormatArg>,
) -> Result<()> {
    let las = read_las(file)?;
    let prepared = pipeline::prepare(&las, &config.processing)
        .with_context(|| format!("Failed to prepare logs from {}", file.display()))?;
    info!(
        well = las.well_name().unwrap_or("UNKNOWN"),
        rows = prepared.rows(),
        "Logs ready for plotting"
    );

    let kinds = layout.kinds();
    let format = resolve_format(format, output, config.figure.format);
    for &kind in &kinds {
        let figure = LogLayout::from_frame(kind, &prepared.frame, config, las.well_name())
            .with_context(|| format!("Failed to lay out {kind} figure"))?;
        let path = output_path(output, file_stem(file), kind, format, kinds.len() > 1);
        render_to_file(&figure, &path, format)
            .with_context(|| format!("Failed to render {}", path.display()))?;
        println!("{}", path.display());
    }
    Ok(())
}

fn run_fraction_panel(
    config: &PlotConfig,
    output: Option<&Path>,
    top: Option<f64>,
    base: Option<f64>,
    format: Option<FormatArg>,
) -> Result<()> {
    let (top, base) = match (top, base, &config.fraction.depths) {
        (Some(top), Some(base), _) => (top, base),
        // Explicit sample depths make the span irrelevant.
        (_, _, Some(_)) => (0.0, 1.0),
        _ => anyhow::bail!("--top and --base are required when [fraction] has no depths"),
    };
    if top > base {
        anyhow::bail!("--top ({top}) must not be deeper than --base ({base})");
    }

    let figure = LogLayout::fraction_panel(config, top, base)?;
    let format = resolve_format(format, output, config.figure.format);
    let path = output_path(output, "fraction", LayoutKind::FractionPanel, format, false);
    render_to_file(&figure, &path, format)
        .with_context(|| format!("Failed to render {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so report output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = PlotConfig::load(args.config.as_deref()).context("Failed to load config")?;

    match args.command {
        SubCommand::Inspect { file, json } => run_inspect(&config, &file, json),
        SubCommand::Plot {
            file,
            layout,
            output,
            format,
        } => run_plot(&config, &file, layout, output.as_deref(), format),
        SubCommand::FractionPanel {
            output,
            top,
            base,
            format,
        } => run_fraction_panel(&config, output.as_deref(), top, base, format),
    }
}

// ============================================================================
// Tests
// ============================================================================
