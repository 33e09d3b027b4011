//! # sweep 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/sweep.rs`

use super::optics::{OpticsArgs, OutputFormat, SlitModeArg};
use crate::models::Parameter;
use crate::utils::units::parse_length;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 可扫描的参数
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SweepParameter {
    /// Wavelength λ (values accept laser names)
    Wavelength,
    /// Slit width a
    SlitWidth,
    /// Slit separation d
    SlitSeparation,
    /// Screen distance D
    ScreenDistance,
}

impl From<SweepParameter> for Parameter {
    fn from(arg: SweepParameter) -> Self {
        match arg {
            SweepParameter::Wavelength => Parameter::Wavelength,
            SweepParameter::SlitWidth => Parameter::SlitWidth,
            SweepParameter::SlitSeparation => Parameter::SlitSeparation,
            SweepParameter::ScreenDistance => Parameter::ScreenDistance,
        }
    }
}

/// sweep 子命令参数
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Parameter to vary
    #[arg(short, long, value_enum)]
    pub parameter: SweepParameter,

    /// Comma-separated values or start:stop:count ranges (e.g., "450nm,532nm,650nm", "red,green,blue", "100um:400um:7")
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub values: Vec<String>,

    /// Base configuration; the swept parameter overrides its counterpart here
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

    /// Output file (PNG/SVG plot or CSV data)
    #[arg(short, long, default_value = "sweep.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

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
