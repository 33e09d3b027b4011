//! # compare 子命令实现
//!
//! 读取实测强度曲线，归一化后与理论双缝图样比较。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 单列数据按屏宽或像素间距生成坐标，两列数据按 position_scale 换算为米
//! - 理论图样覆盖实测坐标范围，采样点不少于实测点数
//! - 单文件输出叠加图，批量输出汇总 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/compare.rs` 定义的 CompareArgs
//! - 使用 `parsers/trace.rs` 读取曲线
//! - 使用 `analysis/` 进行归一化与比较
//! - 使用 `batch/` 模块进行批量处理

use super::{print_configuration, print_warnings};
use crate::analysis::{self, signal, AnalyzerSettings};
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::compare::CompareArgs;
use crate::cli::optics::OutputFormat;
use crate::error::{Result, SlitError};
use crate::models::{ComparisonResult, IntensityProfile, OpticalConfiguration};
use crate::optics::engine;
use crate::optics::export::{self, ComparisonSummary};
use crate::optics::{plot, ChartOptions};
use crate::parsers;
use crate::utils::output;
use crate::utils::units::format_length;

use std::path::Path;
use tabled::{Table, Tabled};

/// 实测曲线的坐标来源
#[derive(Debug, Clone, Copy)]
enum PositionSource {
    /// 单列数据铺满 [-W/2, W/2]
    Screen(f64),
    /// 单列数据按像素间距居中排列
    PixelPitch(f64),
}

/// 单次比较所需的全部设置
#[derive(Debug, Clone, Copy)]
struct CompareContext {
    config: OpticalConfiguration,
    settings: AnalyzerSettings,
    positions: PositionSource,
    position_scale: f64,
    resolution: usize,
}

/// 单个文件的比较产物
struct FileComparison {
    measured: IntensityProfile,
    theoretical: IntensityProfile,
    result: ComparisonResult,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "r")]
    correlation: String,
    #[tabled(rename = "RMS")]
    rms: String,
    #[tabled(rename = "Peaks")]
    peaks: usize,
    #[tabled(rename = "Spacing")]
    spacing: String,
    #[tabled(rename = "Visibility")]
    visibility: String,
}

/// 执行实测/理论比较
pub fn execute(args: CompareArgs) -> Result<()> {
    output::print_header("Measured vs Theoretical Pattern");

    let config = args.optics.configuration()?;
    print_configuration(&config);
    print_warnings(&config.warnings());

    if !args.position_scale.is_finite() || args.position_scale <= 0.0 {
        return Err(SlitError::invalid_parameter(
            "position_scale",
            args.position_scale,
            "must be finite and > 0",
        ));
    }

    let ctx = CompareContext {
        config,
        settings: args.analyzer.settings(),
        positions: match args.pixel_pitch {
            Some(pitch) => PositionSource::PixelPitch(pitch),
            None => PositionSource::Screen(args.screen_width),
        },
        position_scale: args.position_scale,
        resolution: args.resolution,
    };

    if args.input.is_file() {
        execute_single_file(&args, &ctx)
    } else if args.input.is_dir() {
        execute_batch(&args, &ctx)
    } else {
        Err(SlitError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &CompareArgs, ctx: &CompareContext) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let comparison = compare_file(&args.input, ctx)?;
    let result = &comparison.result;

    print_metrics(result, &ctx.config);

    if let Some(path) = &args.output {
        match OutputFormat::resolve(args.format, path) {
            format @ (OutputFormat::Png | OutputFormat::Svg) => {
                let options = ChartOptions {
                    title: format!("{} vs theory", display_name(&args.input)),
                    width: args.width,
                    height: args.height,
                    use_svg: format == OutputFormat::Svg,
                    angular: false,
                };
                plot::generate_comparison_plot(
                    &comparison.measured,
                    &comparison.theoretical,
                    &result.measured_peaks,
                    &options,
                    path,
                )?;
            }
            OutputFormat::Csv => {
                let row = ComparisonSummary::new(args.input.display().to_string(), result);
                export::comparisons_to_csv(&[row], path)?;
            }
            OutputFormat::Xy => {
                return Err(SlitError::InvalidArgument(
                    "comparison output must be an image (png/svg) or a csv summary".to_string(),
                ));
            }
        }
        output::print_success(&format!("Saved to '{}'", path.display()));
    }

    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &CompareArgs, ctx: &CompareContext) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} trace files", files.len()));

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));
    let result = runner.run(&files, "Comparing", |file| {
        let name = file.display().to_string();
        match compare_file(file, ctx) {
            Ok(comparison) => ProcessResult::Success(ComparisonSummary::new(name, &comparison.result)),
            Err(e) => ProcessResult::Failed(name, e.to_string()),
        }
    })?;

    if !result.successes.is_empty() {
        let rows: Vec<SummaryRow> = result
            .successes
            .iter()
            .map(|s| SummaryRow {
                file: display_name(Path::new(&s.file)),
                correlation: format!("{:.4}", s.correlation),
                rms: format!("{:.4}", s.rms_error),
                peaks: s.measured_peaks,
                spacing: s.measured_spacing_m.map_or_else(|| "-".to_string(), format_length),
                visibility: s.visibility.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v)),
            })
            .collect();
        output::print_header("Comparison Summary");
        println!("{}", Table::new(&rows));
    }

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} of {} succeeded, {} failed",
        result.successes.len(),
        result.total(),
        result.failures.len()
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    if let Some(path) = &args.output {
        export::comparisons_to_csv(&result.successes, path)?;
        output::print_success(&format!("Summary saved to '{}'", path.display()));
    }

    Ok(())
}

/// 读取、归一化并比较单个文件
fn compare_file(path: &Path, ctx: &CompareContext) -> Result<FileComparison> {
    let measured = load_measured_profile(path, ctx)?;

    // 对称窗口覆盖实测范围
    let (lo, hi) = measured.domain();
    let screen_width = 2.0 * lo.abs().max(hi.abs());
    let theoretical =
        engine::simulate_experiment(&ctx.config, screen_width, ctx.resolution.max(measured.len()))?;

    let result = analysis::compare_with_theory(&measured, &theoretical, &ctx.settings)?;

    Ok(FileComparison {
        measured,
        theoretical,
        result,
    })
}

/// 读取实测曲线并归一化到 [0, 1]，坐标换算为米
fn load_measured_profile(path: &Path, ctx: &CompareContext) -> Result<IntensityProfile> {
    let trace = parsers::parse_trace_file(path)?;

    match (trace.positions, ctx.positions) {
        (Some(positions), _) => {
            let positions = positions.into_iter().map(|x| x * ctx.position_scale).collect();
            signal::normalize_with_positions(positions, &trace.values)
        }
        (None, PositionSource::PixelPitch(pitch)) => {
            let center = (trace.values.len() as f64 - 1.0) / 2.0;
            let positions = (0..trace.values.len())
                .map(|i| (i as f64 - center) * pitch)
                .collect();
            signal::normalize_with_positions(positions, &trace.values)
        }
        (None, PositionSource::Screen(width)) => signal::normalize_on_screen(&trace.values, width),
    }
}

fn print_metrics(result: &ComparisonResult, config: &OpticalConfiguration) {
    let mut rows: Vec<MetricRow> = result
        .metrics()
        .into_iter()
        .map(|(name, value)| MetricRow {
            metric: name.to_string(),
            value: match name {
                "compared_points" | "measured_peak_count" | "theoretical_peak_count" => {
                    format!("{}", value as usize)
                }
                "measured_fringe_spacing" | "theoretical_fringe_spacing" => format_length(value),
                _ => format!("{:.4}", value),
            },
        })
        .collect();

    rows.push(MetricRow {
        metric: "predicted spacing λD/d".to_string(),
        value: format_length(engine::fringe_spacing(config)),
    });
    if let Some(err) = result.spacing_relative_error() {
        rows.push(MetricRow {
            metric: "spacing deviation".to_string(),
            value: format!("{:.2} %", err * 100.0),
        });
    }

    output::print_header("Comparison Metrics");
    println!("{}", Table::new(&rows));

    if result.measured_fringe_spacing.is_none() {
        output::print_warning("Fewer than 2 peaks detected in the measurement; spacing not estimated");
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_compare_simulated_trace_file() {
        let config = OpticalConfiguration::default();
        let profile = engine::simulate_experiment(&config, 0.012, 600).unwrap();

        // 以 mm 为单位写出两列数据，强度放大模拟相机计数
        let mut content = String::from("# x_mm counts\n");
        for (x, y) in profile.points() {
            content.push_str(&format!("{:.6} {:.3}\n", x * 1e3, 20.0 + 200.0 * y));
        }
        let path = std::env::temp_dir().join(format!("doubleslit_compare_{}.xy", std::process::id()));
        fs::write(&path, content).unwrap();

        let ctx = CompareContext {
            config,
            settings: AnalyzerSettings::default(),
            positions: PositionSource::Screen(0.02),
            position_scale: 1e-3,
            resolution: 4001,
        };
        let comparison = compare_file(&path, &ctx).unwrap();
        fs::remove_file(&path).ok();

        let result = &comparison.result;
        assert!(result.correlation > 0.999);
        assert_eq!(result.measured_peaks.len(), 3);

        // 窗口内只有 0 与 ±1 级亮纹，sinc² 包络把 ±1 级向内拉约 2%，两条曲线同样受影响
        let measured = result.measured_fringe_spacing.unwrap();
        let theoretical = result.theoretical_fringe_spacing.unwrap();
        assert!(
            (measured - theoretical).abs() / theoretical < 0.01,
            "measured {} vs theoretical {}",
            measured,
            theoretical
        );
        assert!(measured < engine::fringe_spacing(&config));
    }

    #[test]
    fn test_pixel_pitch_positions() {
        let path = std::env::temp_dir().join(format!("doubleslit_pixels_{}.txt", std::process::id()));
        fs::write(&path, "1\n5\n2\n").unwrap();

        let ctx = CompareContext {
            config: OpticalConfiguration::default(),
            settings: AnalyzerSettings::default(),
            positions: PositionSource::PixelPitch(5e-6),
            position_scale: 1.0,
            resolution: 11,
        };
        let profile = load_measured_profile(&path, &ctx).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(profile.positions(), &[-5e-6, 0.0, 5e-6]);
        assert_eq!(profile.intensities(), &[0.0, 1.0, 0.25]);
    }
}
