//! # doubleslit - 单缝/双缝衍射图样计算与实验比对
//!
//! 计算 Fraunhofer 单缝衍射与双缝干涉强度分布，并与实验测得的强度曲线比较。
//!
//! ## 子命令
//! - `simulate` - 计算图样，输出条纹表、图表或数据
//! - `compare`  - 实测曲线与理论图样比较（单文件/批量）
//! - `sweep`    - 单参数扫描
//! - `report`   - 手工测量的条纹间距评估
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── optics/    (衍射计算、扫描、绘图、导出)
//!   │     ├── analysis/  (归一化、峰谷检测、比较)
//!   │     ├── parsers/   (实测曲线解析)
//!   │     ├── batch/     (批量文件处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (输出、进度条、单位)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod optics;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
