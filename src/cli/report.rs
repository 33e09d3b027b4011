//! # report 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/report.rs`

use super::optics::OpticsArgs;
use crate::utils::units::parse_length;

use clap::Args;

/// report 子命令参数
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Measured fringe spacing on the screen (e.g., 3.3mm)
    #[arg(short, long, value_parser = parse_length)]
    pub measured: f64,

    #[command(flatten)]
    pub optics: OpticsArgs,

    /// Uncertainty of the screen distance measurement
    #[arg(long, value_parser = parse_length)]
    pub distance_uncertainty: Option<f64>,

    /// Uncertainty of the nominal slit separation
    #[arg(long, value_parser = parse_length)]
    pub separation_uncertainty: Option<f64>,
}
