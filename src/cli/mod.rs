//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `simulate`: 计算单缝/双缝图样并输出条纹表、图表或数据
//! - `compare`: 实测曲线与理论图样比较（单文件或目录批量）
//! - `sweep`: 单参数扫描，输出曲线族
//! - `report`: 手工测量的条纹间距与理论值对照
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: optics, simulate, compare, sweep, report

pub mod compare;
pub mod optics;
pub mod report;
pub mod simulate;
pub mod sweep;

use clap::{Parser, Subcommand};

/// doubleslit - 单缝/双缝 Fraunhofer 衍射计算与实验比对
#[derive(Parser)]
#[command(name = "doubleslit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Fraunhofer single/double-slit pattern simulation and lab comparison", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a single- or double-slit intensity pattern
    Simulate(simulate::SimulateArgs),

    /// Compare measured intensity traces with the theoretical pattern
    Compare(compare::CompareArgs),

    /// Sweep one optical parameter and plot the family of patterns
    Sweep(sweep::SweepArgs),

    /// Check a hand-measured fringe spacing against the prediction
    Report(report::ReportArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_units_and_presets() {
        let cli = Cli::try_parse_from([
            "doubleslit", "simulate", "-l", "green", "-d", "0.25mm", "-D", "150cm",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.optics.wavelength, 532e-9);
                assert!((args.optics.slit_separation - 0.25e-3).abs() < 1e-15);
                assert!((args.optics.screen_distance - 1.5).abs() < 1e-12);
                assert!((args.optics.slit_width - 50e-6).abs() < 1e-15);
                assert_eq!(args.resolution, 2001);
            }
            _ => panic!("expected simulate"),
        }

        let cli = Cli::try_parse_from([
            "doubleslit", "sweep", "-p", "wavelength", "-v", "450nm,red",
        ])
        .unwrap();
        match cli.command {
            Commands::Sweep(args) => assert_eq!(args.values, vec!["450nm", "red"]),
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn test_parse_analyzer_thresholds() {
        let cli = Cli::try_parse_from([
            "doubleslit", "compare", "trace.csv", "--prominence", "0.1", "--grid-tolerance", "1e-3",
        ])
        .unwrap();
        match cli.command {
            Commands::Compare(args) => {
                let settings = args.analyzer.settings();
                assert_eq!(settings.prominence, 0.1);
                assert_eq!(settings.grid_tolerance, 1e-3);
                assert_eq!(settings.min_distance, 3);
            }
            _ => panic!("expected compare"),
        }

        let cli = Cli::try_parse_from(["doubleslit", "compare", "trace.csv"]).unwrap();
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.analyzer.settings(), crate::analysis::AnalyzerSettings::default())
            }
            _ => panic!("expected compare"),
        }
    }
}
