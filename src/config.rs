use anyhow::{anyhow, Result};
use clap::Parser;

use crate::app::Pane;
use crate::theme::Theme;
use crate::visualizer::VisualizerConfig;

/// blockfall - falling-block explorer for a live chain
///
/// Shows recent blocks and transactions as a grid of tiles that drop into place.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug, Default)]
#[command(name = "blockfall")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Falling-block blockchain explorer", long_about = None)]
pub struct CliArgs {
    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Available FPS options for Ctrl+O cycling (comma-separated, e.g., "30,60")
    #[arg(long, env = "RENDER_FPS_CHOICES")]
    pub render_fps_choices: Option<String>,

    /// Number of recent blocks to keep on the grid (1-1000)
    #[arg(long, env = "KEEP_BLOCKS")]
    pub keep_blocks: Option<usize>,

    /// Number of recent transactions to keep on the grid (1-5000)
    #[arg(long, env = "KEEP_TXS")]
    pub keep_txs: Option<usize>,

    /// Maximum grid rows before tiles shrink (1-50)
    #[arg(long, env = "MAX_ROWS")]
    pub max_rows: Option<usize>,

    /// Gap between tiles in pixels (0-32)
    #[arg(long, env = "GRID_GAP")]
    pub gap: Option<f64>,

    /// Color theme: dark or light
    #[arg(long, env = "THEME", value_parser = clap::value_parser!(Theme))]
    pub theme: Option<Theme>,

    /// Interval between simulated blocks in milliseconds (100-60000)
    #[arg(long, env = "BLOCK_INTERVAL_MS")]
    pub block_interval_ms: Option<u64>,

    /// Upper bound of transactions per simulated block (0-500)
    #[arg(long, env = "MAX_TXS_PER_BLOCK")]
    pub max_txs_per_block: Option<usize>,

    /// Seed for spawn jitter and the simulated chain (random if unset)
    #[arg(long, env = "SPAWN_SEED")]
    pub seed: Option<u64>,

    /// Place tiles without the drop animation
    #[arg(long, env = "REDUCED_MOTION")]
    pub reduced_motion: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub render_fps: u32,
    pub render_fps_choices: Vec<u32>,
    pub keep_blocks: usize,
    pub keep_txs: usize,
    pub max_rows: usize,
    pub gap: f64,
    pub theme: Theme,
    pub block_interval_ms: u64,
    pub max_txs_per_block: usize,
    pub seed: Option<u64>,
    pub reduced_motion: bool,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Parse comma-separated FPS list and validate each value
fn parse_fps_list(s: &str) -> Vec<u32> {
    s.split(',')
        .filter_map(|v| v.trim().parse::<u32>().ok())
        .filter(|n| (1..=120).contains(n))
        .collect()
}

/// Load configuration from CLI args and environment variables
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<Config> {
    load_from(CliArgs::parse())
}

/// Validate already-parsed arguments and fill in defaults
pub fn load_from(args: CliArgs) -> Result<Config> {
    // FPS choices with validation
    let render_fps_choices = args
        .render_fps_choices
        .map(|s| parse_fps_list(&s))
        .unwrap_or_else(|| vec![30, 60]);

    // Ensure render_fps_choices is not empty
    let Some(&default_fps) = render_fps_choices.first() else {
        return Err(anyhow!(
            "RENDER_FPS_CHOICES must contain at least one valid value (1-120)"
        ));
    };

    // Render FPS (default to first choice if not specified)
    let render_fps = validate_in_range(
        args.render_fps.unwrap_or(default_fps),
        1,
        120,
        "RENDER_FPS",
    )?;

    let keep_blocks = validate_in_range(args.keep_blocks.unwrap_or(60), 1, 1000, "KEEP_BLOCKS")?;
    let keep_txs = validate_in_range(args.keep_txs.unwrap_or(240), 1, 5000, "KEEP_TXS")?;
    let max_rows = validate_in_range(args.max_rows.unwrap_or(10), 1, 50, "MAX_ROWS")?;

    let gap = args.gap.unwrap_or(crate::constants::layout::GAP);
    if !gap.is_finite() {
        return Err(anyhow!("GRID_GAP must be a finite number"));
    }
    let gap = validate_in_range(gap, 0.0, 32.0, "GRID_GAP")?;

    let block_interval_ms = validate_in_range(
        args.block_interval_ms.unwrap_or(1200),
        100,
        60_000,
        "BLOCK_INTERVAL_MS",
    )?;
    let max_txs_per_block = validate_in_range(
        args.max_txs_per_block.unwrap_or(24),
        0,
        500,
        "MAX_TXS_PER_BLOCK",
    )?;

    Ok(Config {
        render_fps,
        render_fps_choices,
        keep_blocks,
        keep_txs,
        max_rows,
        gap,
        theme: args.theme.unwrap_or_default(),
        block_interval_ms,
        max_txs_per_block,
        seed: args.seed,
        reduced_motion: args.reduced_motion.unwrap_or(false),
    })
}

impl Config {
    /// Visualizer settings for one pane
    pub fn visualizer_config(&self, pane: Pane) -> VisualizerConfig {
        let base = match pane {
            Pane::Blocks => VisualizerConfig::blocks(),
            Pane::Transactions => VisualizerConfig::transactions(),
        };
        base.with_max_rows(self.max_rows).with_gap(self.gap)
    }

    /// Print current configuration (useful for debugging)
    pub fn print_summary(&self) {
        eprintln!("blockfall Configuration:");
        eprintln!("  Render FPS: {} (choices {:?})", self.render_fps, self.render_fps_choices);
        eprintln!("  Keep: {} blocks, {} txs", self.keep_blocks, self.keep_txs);
        eprintln!("  Grid: max {} rows, gap {}px", self.max_rows, self.gap);
        eprintln!("  Theme: {}", self.theme);
        eprintln!(
            "  Feed: every {}ms, up to {} txs/block",
            self.block_interval_ms, self.max_txs_per_block
        );
        match self.seed {
            Some(seed) => eprintln!("  Seed: {seed}"),
            None => eprintln!("  Seed: random"),
        }
        if self.reduced_motion {
            eprintln!("  Reduced motion: on");
        }
    }
}
