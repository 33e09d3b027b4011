//! # simulate 子命令实现
//!
//! 计算单缝/双缝强度分布，打印推导量与条纹表，可选输出图表或数据文件。
//!
//! ## 依赖关系
//! - 使用 `cli/simulate.rs` 定义的 SimulateArgs
//! - 使用 `optics/engine.rs` 计算，`optics/plot.rs` 与 `optics/export.rs` 输出

use super::{print_configuration, print_warnings};
use crate::cli::optics::OutputFormat;
use crate::cli::simulate::SimulateArgs;
use crate::error::Result;
use crate::models::{ConfigWarning, IntensityProfile, OpticalConfiguration};
use crate::optics::engine::{self, Normalization, SlitMode, SMALL_ANGLE_LIMIT};
use crate::optics::{export, plot, ChartOptions};
use crate::utils::output;
use crate::utils::units::format_length;

use std::f64::consts::TAU;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct FringeRow {
    #[tabled(rename = "Order m")]
    order: i32,
    #[tabled(rename = "y = mλD/d")]
    small_angle: String,
    #[tabled(rename = "y (exact)")]
    exact: String,
    #[tabled(rename = "Dark y = (m+½)λD/d")]
    dark: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// 执行图样模拟
pub fn execute(args: SimulateArgs) -> Result<()> {
    output::print_header("Fraunhofer Diffraction Pattern");

    let config = args.optics.configuration()?;
    let mode: SlitMode = args.mode.into();
    let normalization = if args.raw {
        Normalization::Raw
    } else {
        Normalization::Peak
    };

    print_configuration(&config);
    let wave = config.wave();
    output::print_field("Frequency", &format!("{:.4e} Hz", wave.frequency()));
    output::print_field("Wave number", &format!("{:.4e} rad/m", wave.wave_number()));
    // 缝到屏中心的光程相位，模 2π
    let distance = config.screen_distance();
    let phase = wave.phase_at(distance).rem_euclid(TAU);
    let (re, im) = wave.amplitude_at(distance);
    output::print_field(
        "Phase at screen",
        &format!("{:.4} rad (field {:+.4} {:+.4}i)", phase, re, im),
    );

    let profile = match args.max_angle {
        Some(max_angle) => {
            let mut warnings = config.warnings();
            if max_angle > SMALL_ANGLE_LIMIT {
                warnings.push(ConfigWarning::WideAngle {
                    max_angle,
                    limit: SMALL_ANGLE_LIMIT,
                });
            }
            print_warnings(&warnings);
            angular_profile(&config, max_angle, args.resolution, mode, normalization)?
        }
        None => {
            print_warnings(&engine::window_warnings(&config, args.screen_width));
            engine::simulate(&config, args.screen_width, args.resolution, mode, normalization)?
        }
    };

    output::print_separator();
    print_derived_quantities(&config, &args);
    if mode == SlitMode::Double {
        print_fringe_table(&config, args.orders);
    }

    if let Some(path) = &args.output {
        let format = OutputFormat::resolve(args.format, path);
        let title = args.title.clone().unwrap_or_else(|| {
            format!("{} pattern, λ = {:.0} nm", mode, config.wavelength() * 1e9)
        });

        match format {
            OutputFormat::Png | OutputFormat::Svg => {
                let options = ChartOptions {
                    title,
                    width: args.width,
                    height: args.height,
                    use_svg: format == OutputFormat::Svg,
                    angular: args.max_angle.is_some(),
                };
                plot::generate_profile_plot(&profile, &config, mode, &options, path)?;
            }
            OutputFormat::Csv => export::profile_to_csv(&profile, path)?,
            OutputFormat::Xy => export::profile_to_xy(&profile, &config, &title, path)?,
        }
        output::print_success(&format!(
            "{} points saved to '{}'",
            profile.len(),
            path.display()
        ));
    }

    Ok(())
}

/// 角度采样的图样，按需归一化到窗口峰值
fn angular_profile(
    config: &OpticalConfiguration,
    max_angle: f64,
    resolution: usize,
    mode: SlitMode,
    normalization: Normalization,
) -> Result<IntensityProfile> {
    let profile = engine::simulate_angular(config, max_angle, resolution, mode)?;
    let peak = profile.peak_intensity();
    if normalization == Normalization::Raw || peak <= 0.0 {
        return Ok(profile);
    }
    let (angles, intensities) = profile.into_parts();
    IntensityProfile::new(angles, intensities.into_iter().map(|v| v / peak).collect())
}

fn print_derived_quantities(config: &OpticalConfiguration, args: &SimulateArgs) {
    output::print_field("Fringe spacing", &format_length(engine::fringe_spacing(config)));
    output::print_field(
        "Angular spacing",
        &format!("{:.4} mrad", engine::angular_fringe_spacing(config) * 1e3),
    );

    let zeros: Vec<String> = engine::envelope_minima(config, -2..=2)
        .into_iter()
        .map(|(m, y)| format!("{:+}: {}", m, format_length(y)))
        .collect();
    if !zeros.is_empty() {
        output::print_field("Envelope zeros", &zeros.join(", "));
    }

    if args.max_angle.is_none() {
        output::print_field(
            "Window edge angle",
            &format!("{:.4} rad", engine::max_angle(config, args.screen_width)),
        );
        output::print_field(
            "Bright fringes/side",
            &engine::expected_fringe_count(config, args.screen_width).to_string(),
        );
    }
}

/// 打印亮纹位置表（小角近似与精确几何对照，标出缺级）
fn print_fringe_table(config: &OpticalConfiguration, max_order: i32) {
    let max_order = max_order.max(0);
    let small_angle = engine::bright_fringe_positions(config, -max_order..=max_order);
    let exact = engine::exact_bright_fringe_positions(config, -max_order..=max_order);
    let dark = engine::dark_fringe_positions(config, -max_order..=max_order);
    let missing = engine::missing_orders(config, max_order);

    let rows: Vec<FringeRow> = (-max_order..=max_order)
        .zip(small_angle)
        .zip(dark)
        .map(|((m, y), dark)| FringeRow {
            order: m,
            small_angle: format_length(y),
            exact: exact
                .iter()
                .find(|(order, _)| *order == m)
                .map_or_else(|| "-".to_string(), |(_, y)| format_length(*y)),
            dark: format_length(dark),
            note: if missing.contains(&m) {
                "missing (envelope zero)".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    output::print_header(&format!("Bright Fringes up to Order ±{}", max_order));
    println!("{}", Table::new(&rows));
}
