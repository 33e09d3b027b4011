//! # compare 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/compare.rs`

use super::optics::{AnalyzerArgs, OpticsArgs, OutputFormat};
use crate::utils::units::parse_length;

use clap::Args;
use std::path::PathBuf;

/// compare 子命令参数
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Input: measured trace file (.csv, .xy, .dat, .txt) or directory of traces
    pub input: PathBuf,

    #[command(flatten)]
    pub optics: OpticsArgs,

    #[command(flatten)]
    pub analyzer: AnalyzerArgs,

    /// Physical width spanned by a single-column trace (samples are spread over [-W/2, W/2])
    #[arg(long, default_value = "2cm", value_parser = parse_length)]
    pub screen_width: f64,

    /// Camera pixel pitch for single-column traces; overrides --screen-width
    #[arg(long, value_parser = parse_length)]
    pub pixel_pitch: Option<f64>,

    /// Factor converting the position column of two-column traces to meters (e.g., 1e-3 for mm)
    #[arg(long, default_value_t = 1.0)]
    pub position_scale: f64,

    /// Number of theoretical sample points (at least the trace length is used)
    #[arg(short, long, default_value_t = 4001)]
    pub resolution: usize,

    /// Output: overlay plot (single mode) or summary CSV (batch mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Plot format for single mode (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode, e.g., "*.csv,*.xy")
    #[arg(long, default_value = "*.csv,*.xy,*.dat,*.txt")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,
}
