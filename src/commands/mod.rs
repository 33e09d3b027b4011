//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。每次执行都从参数重新构造配置，不保留状态。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `optics/`, `analysis/`, `parsers/`, `batch/`, `utils/`
//! - 子模块: simulate, compare, sweep, report

pub mod compare;
pub mod report;
pub mod simulate;
pub mod sweep;

use crate::cli::Commands;
use crate::error::Result;
use crate::models::{ConfigWarning, OpticalConfiguration};
use crate::utils::output;
use crate::utils::units::format_length;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Simulate(args) => simulate::execute(args),
        Commands::Compare(args) => compare::execute(args),
        Commands::Sweep(args) => sweep::execute(args),
        Commands::Report(args) => report::execute(args),
    }
}

/// 打印光学配置
fn print_configuration(config: &OpticalConfiguration) {
    output::print_field("Wavelength", &format_length(config.wavelength()));
    output::print_field("Slit width", &format_length(config.slit_width()));
    output::print_field("Slit separation", &format_length(config.slit_separation()));
    output::print_field("Screen distance", &format_length(config.screen_distance()));
}

/// 打印非致命警告
fn print_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        output::print_warning(&warning.to_string());
    }
}
