//! # simulate 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/simulate.rs`

use super::optics::{OpticsArgs, OutputFormat, SlitModeArg};
use crate::utils::units::parse_length;

use clap::Args;
use std::path::PathBuf;

/// simulate 子命令参数
#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub optics: OpticsArgs,

    /// Slit geometry
    #[arg(short, long, value_enum, default_value = "double")]
    pub mode: SlitModeArg,

    /// Width of the observation window on the screen
    #[arg(long, default_value = "2cm", value_parser = parse_length)]
    pub screen_width: f64,

    /// Number of sample points across the window
    #[arg(short, long, default_value_t = 2001)]
    pub resolution: usize,

    /// Sample over diffraction angle θ ∈ [-MAX_ANGLE, MAX_ANGLE] (radians) instead of screen position
    #[arg(long)]
    pub max_angle: Option<f64>,

    /// Keep raw formula intensities (central maximum = 1) instead of normalizing to the window peak
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Highest fringe order listed in the fringe table
    #[arg(long, default_value_t = 5)]
    pub orders: i32,

    /// Output file (PNG/SVG plot, CSV/XY data); omit to only print the summary
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot
    #[arg(long)]
    pub title: Option<String>,
}
