//! # sweep 子命令实现
//!
//! 对单个光学参数取一组值并行计算图样，输出曲线族图表或长表 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/sweep.rs` 定义的 SweepArgs
//! - 使用 `optics/sweep.rs` 计算，`batch/runner.rs` 提供线程池
//! - 使用 `optics/plot.rs`, `optics/export.rs` 输出

use super::{print_configuration, print_warnings};
use crate::batch::BatchRunner;
use crate::cli::optics::OutputFormat;
use crate::cli::sweep::SweepArgs;
use crate::error::{Result, SlitError};
use crate::models::Parameter;
use crate::optics::engine;
use crate::optics::plot::format_parameter_value;
use crate::optics::sweep::{self, SweepSettings};
use crate::optics::{export, plot, ChartOptions};
use crate::utils::units::{format_length, parse_length, parse_wavelength};
use crate::utils::{output, progress};

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SweepRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Fringe spacing")]
    spacing: String,
    #[tabled(rename = "Bright fringes/side")]
    fringes: usize,
    #[tabled(rename = "Missing orders (±10)")]
    missing: String,
}

/// 执行参数扫描
pub fn execute(args: SweepArgs) -> Result<()> {
    output::print_header("Parameter Sweep");

    let base = args.optics.configuration()?;
    let parameter: Parameter = args.parameter.into();
    let values = parse_values(parameter, &args.values)?;

    print_configuration(&base);
    output::print_info(&format!(
        "Sweeping {} over {} values (base {})",
        parameter,
        values.len(),
        format_parameter_value(parameter, base.parameter(parameter))
    ));

    let format = OutputFormat::resolve(args.format, &args.output);
    if format == OutputFormat::Xy {
        return Err(SlitError::InvalidArgument(
            "XY files hold a single pattern; use csv for sweep data".to_string(),
        ));
    }

    let settings = SweepSettings {
        screen_width: args.screen_width,
        resolution: args.resolution,
        mode: args.mode.into(),
    };

    let runner = BatchRunner::new(args.jobs);
    let spinner = progress::create_spinner(&format!("Computing {} patterns...", values.len()));
    let points = runner.install(|| sweep::run_sweep(&base, parameter, &values, settings))?;
    spinner.finish_and_clear();
    let points = points?;

    let rows: Vec<SweepRow> = points
        .iter()
        .map(|p| {
            let missing = engine::missing_orders(&p.configuration, 10);
            SweepRow {
                value: format_parameter_value(parameter, p.value),
                spacing: format_length(p.fringe_spacing),
                fringes: engine::expected_fringe_count(&p.configuration, args.screen_width),
                missing: if missing.is_empty() {
                    "-".to_string()
                } else {
                    missing
                        .iter()
                        .map(|m| m.to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                },
            }
        })
        .collect();
    output::print_header("Sweep Results");
    println!("{}", Table::new(&rows));

    for point in &points {
        let warnings = engine::window_warnings(&point.configuration, args.screen_width);
        if !warnings.is_empty() {
            output::print_info(&format_parameter_value(parameter, point.value));
            print_warnings(&warnings);
        }
    }

    match format {
        OutputFormat::Csv => export::sweep_to_csv(&points, parameter, &args.output)?,
        _ => {
            let options = ChartOptions {
                title: args
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("{} sweep", parameter)),
                width: args.width,
                height: args.height,
                use_svg: format == OutputFormat::Svg,
                angular: false,
            };
            plot::generate_sweep_plot(&points, parameter, &options, &args.output)?;
        }
    }
    output::print_success(&format!("Saved to '{}'", args.output.display()));

    Ok(())
}

/// 解析扫描取值，波长还接受激光器名称
///
/// 每项可以是单个值，或 `start:stop:count` 形式的等间距区间（含两端）
fn parse_values(parameter: Parameter, raw: &[String]) -> Result<Vec<f64>> {
    let parse_one = |v: &str| {
        let parsed = match parameter {
            Parameter::Wavelength => parse_wavelength(v),
            _ => parse_length(v),
        };
        parsed.map_err(SlitError::InvalidArgument)
    };

    let mut values = Vec::new();
    for item in raw {
        if !item.contains(':') {
            values.push(parse_one(item)?);
            continue;
        }

        let parts: Vec<&str> = item.split(':').map(str::trim).collect();
        let [start, stop, count] = parts[..] else {
            return Err(SlitError::InvalidRange(format!(
                "'{}': expected start:stop:count",
                item
            )));
        };
        let start = parse_one(start)?;
        let stop = parse_one(stop)?;
        let count: usize = count
            .parse()
            .map_err(|_| SlitError::InvalidRange(format!("'{}': count must be an integer", item)))?;
        if count < 2 {
            return Err(SlitError::InvalidRange(format!(
                "'{}': count must be at least 2",
                item
            )));
        }

        let step = (stop - start) / (count - 1) as f64;
        values.extend((0..count).map(|i| start + step * i as f64));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        let raw = vec!["red".to_string(), "532nm".to_string()];
        let values = parse_values(Parameter::Wavelength, &raw).unwrap();
        assert_eq!(values[0], 650e-9);
        assert!((values[1] - 532e-9).abs() < 1e-20);

        let raw = vec!["red".to_string()];
        assert!(parse_values(Parameter::SlitWidth, &raw).is_err());
    }

    #[test]
    fn test_parse_value_ranges() {
        let raw = vec!["100um:300um:5".to_string(), "500um".to_string()];
        let values = parse_values(Parameter::SlitSeparation, &raw).unwrap();
        let expected = [100e-6, 150e-6, 200e-6, 250e-6, 300e-6, 500e-6];
        assert_eq!(values.len(), expected.len());
        for (v, e) in values.iter().zip(expected) {
            assert!((v - e).abs() < 1e-15, "{} vs {}", v, e);
        }

        let values = parse_values(Parameter::Wavelength, &["blue:red:3".to_string()]).unwrap();
        assert_eq!(values[0], 450e-9);
        assert!((values[1] - 550e-9).abs() < 1e-20);
        assert!((values[2] - 650e-9).abs() < 1e-20);

        for bad in ["1mm:2mm", "1mm:2mm:1", "1mm:2mm:x", "1mm:2mm:3:4"] {
            assert!(
                matches!(
                    parse_values(Parameter::SlitWidth, &[bad.to_string()]),
                    Err(SlitError::InvalidRange(_))
                ),
                "{}",
                bad
            );
        }
    }
}
