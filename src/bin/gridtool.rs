use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use qr_resample::config::{BorderMode, PipelineConfig};
use qr_resample::resample::{VoteRule, sample_stride};
use qr_resample::tools::{collect_grid_files, grid_stats, sibling_output};
use qr_resample::utils::preview::preview;
use qr_resample::utils::raster::{DEFAULT_LUMA_THRESHOLD, save_grid_image};
use qr_resample::utils::text::write_grid;
use qr_resample::{BinaryGrid, has_border, load_grid, run};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "gridtool", version, about = "Binary QR grid tools")]
struct Cli {
    /// Luma below which a raster pixel counts as set
    #[arg(long, global = true, default_value_t = DEFAULT_LUMA_THRESHOLD)]
    luma: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone)]
struct ResampleArgs {
    /// Side length of the square result (env GRID_TARGET_SIZE)
    #[arg(long)]
    target: Option<usize>,
    /// Strict fraction of set cells a block needs; majority vote when omitted
    /// (env GRID_THRESHOLD)
    #[arg(long)]
    threshold: Option<f64>,
    /// Always remove this many cells from each edge
    #[arg(long, conflicts_with = "auto_border")]
    trim: Option<usize>,
    /// Remove a border only when the first row and column are all set
    #[arg(long, num_args = 0..=1, default_missing_value = "9")]
    auto_border: Option<usize>,
    /// Invert the grid before trimming
    #[arg(long)]
    invert: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Trim and block-vote a capture down to its module grid
    Resample {
        #[arg(long)]
        input: PathBuf,
        /// Text output; defaults to `<stem>-resampled.txt`, or
        /// `<stem>-<ext>-resampled.txt` for raster input
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also render the result to this image
        #[arg(long)]
        image: Option<PathBuf>,
        /// Pixels per module for `--image` (env GRID_CELL_SIZE)
        #[arg(long)]
        cell_size: Option<u32>,
        #[command(flatten)]
        opts: ResampleArgs,
        /// Print a block-character preview
        #[arg(long)]
        preview: bool,
    },
    /// Resample every text/image grid in a directory
    Batch {
        #[arg(long)]
        dir: PathBuf,
        #[command(flatten)]
        opts: ResampleArgs,
    },
    /// Keep one cell per stride×stride tile
    Stride {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 3)]
        stride: usize,
        #[arg(long, default_value_t = 1)]
        row_offset: usize,
        #[arg(long, default_value_t = 1)]
        col_offset: usize,
    },
    /// Flip every cell
    Invert {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Convert a text or raster grid to text
    Convert {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Render a grid to an image
    Render {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 10)]
        cell_size: u32,
        #[arg(long)]
        invert: bool,
    },
    /// Show a grid in the terminal
    Preview {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        invert: bool,
    },
    /// Print dimensions, set ratio and border detection
    Stats {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let luma = cli.luma;

    match cli.command {
        Command::Resample {
            input,
            output,
            image,
            cell_size,
            opts,
            preview,
        } => resample_cmd(&input, output, image, cell_size, &opts, preview, luma),
        Command::Batch { dir, opts } => batch_cmd(&dir, &opts, luma),
        Command::Stride {
            input,
            output,
            stride,
            row_offset,
            col_offset,
        } => {
            let grid = load(&input, luma)?;
            let sampled = sample_stride(&grid, stride, row_offset, col_offset)?;
            write_grid(&output, &sampled)?;
            println!(
                "{}x{} -> {}x{} written to {}",
                grid.rows(),
                grid.cols(),
                sampled.rows(),
                sampled.cols(),
                output.display()
            );
            Ok(())
        }
        Command::Invert { input, output } => {
            let grid = load(&input, luma)?;
            write_grid(&output, &grid.inverted())?;
            println!("Inverted grid written to {}", output.display());
            Ok(())
        }
        Command::Convert { input, output } => {
            let grid = load(&input, luma)?;
            write_grid(&output, &grid)?;
            println!(
                "{}x{} grid written to {}",
                grid.rows(),
                grid.cols(),
                output.display()
            );
            Ok(())
        }
        Command::Render {
            input,
            output,
            cell_size,
            invert,
        } => {
            let grid = maybe_invert(load(&input, luma)?, invert);
            save_grid_image(&output, &grid, cell_size)?;
            println!("Image saved to {}", output.display());
            Ok(())
        }
        Command::Preview { input, invert } => {
            let grid = maybe_invert(load(&input, luma)?, invert);
            print!("{}", preview(&grid));
            Ok(())
        }
        Command::Stats { input } => {
            let grid = load(&input, luma)?;
            let stats = grid_stats(&grid);
            println!("Grid: {} ({}x{})", input.display(), stats.rows, stats.cols);
            println!(
                "Set cells: {}/{} = {:.2}%",
                stats.set_cells,
                stats.total_cells,
                stats.set_ratio * 100.0
            );
            println!("Border detected: {}", if has_border(&grid) { "yes" } else { "no" });
            Ok(())
        }
    }
}

fn load(path: &Path, luma: u8) -> Result<BinaryGrid> {
    load_grid(path, luma).with_context(|| format!("failed to load {}", path.display()))
}

fn maybe_invert(grid: BinaryGrid, invert: bool) -> BinaryGrid {
    if invert { grid.inverted() } else { grid }
}

fn build_config(input: &Path, opts: &ResampleArgs, luma: u8) -> PipelineConfig {
    let mut config = PipelineConfig::from_env_defaults(input);
    config.luma_threshold = luma;
    config.invert = opts.invert;
    if let Some(target) = opts.target {
        config.target_size = target;
    }
    if let Some(threshold) = opts.threshold {
        config.rule = VoteRule::Above(threshold);
    }
    if let Some(amount) = opts.trim {
        config.border = BorderMode::Fixed(amount);
    } else if let Some(amount) = opts.auto_border {
        config.border = BorderMode::Auto(amount);
    }
    config
}

fn resample_cmd(
    input: &Path,
    output: Option<PathBuf>,
    image: Option<PathBuf>,
    cell_size: Option<u32>,
    opts: &ResampleArgs,
    show_preview: bool,
    luma: u8,
) -> Result<()> {
    let mut config = build_config(input, opts, luma);
    let output = output.unwrap_or_else(|| sibling_output(input, "resampled"));
    config.output = Some(output.clone());
    config.image_output = image;
    if let Some(size) = cell_size {
        config.cell_size = size;
    }
    config.show_preview = show_preview;

    println!("Reading {}", input.display());
    let report = run(&config).with_context(|| format!("failed to resample {}", input.display()))?;
    println!(
        "Original size: {}x{}",
        report.source_dims.0, report.source_dims.1
    );
    if report.border_removed > 0 {
        println!(
            "Border of {} removed -> {}x{}",
            report.border_removed, report.trimmed_dims.0, report.trimmed_dims.1
        );
    }
    println!(
        "Resampled to {}x{} with {:?}",
        report.grid.rows(),
        report.grid.cols(),
        config.rule
    );
    println!("Saved to {}", output.display());
    if let Some(path) = &config.image_output {
        println!("Image saved to {}", path.display());
    }
    Ok(())
}

fn batch_cmd(dir: &Path, opts: &ResampleArgs, luma: u8) -> Result<()> {
    if !dir.is_dir() {
        bail!("directory not found: {}", dir.display());
    }
    let files = collect_grid_files(dir, "resampled");
    if files.is_empty() {
        println!("No grid files found under {}", dir.display());
        return Ok(());
    }

    let mut failures = 0usize;
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let start = Instant::now();
    for (i, path) in files.iter().enumerate() {
        let mut config = build_config(path, opts, luma);
        let output = sibling_output(path, "resampled");
        if !claimed.insert(output.clone()) {
            failures += 1;
            eprintln!(
                "  [{}] {} -> failed: {} already written in this run",
                i + 1,
                path.display(),
                output.display()
            );
            continue;
        }
        config.output = Some(output.clone());
        match run(&config) {
            Ok(report) => println!(
                "  [{}] {} ({}x{}) -> {}",
                i + 1,
                path.display(),
                report.source_dims.0,
                report.source_dims.1,
                output.display()
            ),
            Err(err) => {
                failures += 1;
                eprintln!("  [{}] {} -> failed: {}", i + 1, path.display(), err);
            }
        }
    }
    println!(
        "Processed {} files, {} failed ({:.2?})",
        files.len(),
        failures,
        start.elapsed()
    );
    if failures > 0 {
        bail!("{} of {} files failed", failures, files.len());
    }
    Ok(())
}
