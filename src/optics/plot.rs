//! # 衍射图样图表生成
//!
//! 使用 `plotters` 库绘制强度分布。
//!
//! ## 功能
//! - 单条图样：强度曲线 + 单缝包络 + 屏幕条纹色带
//! - 实测与理论叠加对比
//! - 参数扫描曲线族
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/simulate.rs`, `commands/compare.rs`, `commands/sweep.rs` 调用
//! - 使用 `optics/engine.rs` 计算包络
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, SlitError};
use crate::models::{IntensityProfile, OpticalConfiguration, Parameter};
use crate::optics::engine::{self, SlitMode};
use crate::optics::sweep::SweepPoint;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 坐标轴以 mm 显示
const MM: f64 = 1e3;

/// 图表输出选项
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
    /// 横坐标为衍射角（rad）而非屏上坐标（m）
    pub angular: bool,
}

impl ChartOptions {
    fn x_desc(&self) -> &'static str {
        if self.angular {
            "Diffraction angle (mrad)"
        } else {
            "Screen position (mm)"
        }
    }
}

fn plot_err<E: std::fmt::Debug>(e: E) -> SlitError {
    SlitError::PlotError(format!("{:?}", e))
}

// ─────────────────────────────────────────────────────────────
// 单条图样
// ─────────────────────────────────────────────────────────────

/// 生成单条图样图表
pub fn generate_profile_plot(
    profile: &IntensityProfile,
    config: &OpticalConfiguration,
    mode: SlitMode,
    options: &ChartOptions,
    output_path: &Path,
) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_profile_chart(&root, profile, config, mode, options)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_profile_chart(&root, profile, config, mode, options)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_profile_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    profile: &IntensityProfile,
    config: &OpticalConfiguration,
    mode: SlitMode,
    options: &ChartOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (_, height) = root.dim_in_pixel();
    let (upper, lower) = root.split_vertically((height * 4 / 5) as i32);

    let (x_min, x_max) = profile.domain();
    let y_max = profile.peak_intensity().max(f64::MIN_POSITIVE) * 1.1;

    let mut chart = ChartBuilder::on(&upper)
        .caption(&options.title, ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min * MM..x_max * MM, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(options.x_desc())
        .y_desc("Intensity")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(AreaSeries::new(
            profile.points().map(|(x, y)| (x * MM, y)),
            0.0,
            line_color.mix(0.15),
        ))
        .map_err(plot_err)?;
    chart
        .draw_series(LineSeries::new(
            profile.points().map(|(x, y)| (x * MM, y)),
            line_color.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label(format!("{} slit", mode))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2)));

    // 双缝图样叠加单缝包络，与曲线使用同一归一化系数
    if mode == SlitMode::Double {
        let (raw, envelope) = if options.angular {
            let xs = profile.positions();
            (
                xs.iter().map(|&t| engine::double_slit_at_angle(t, config)).collect::<Vec<_>>(),
                xs.iter().map(|&t| engine::single_slit_at_angle(t, config)).collect::<Vec<_>>(),
            )
        } else {
            (
                engine::double_slit_intensity(profile.positions(), config),
                engine::single_slit_intensity(profile.positions(), config),
            )
        };
        let raw_max = raw.iter().cloned().fold(0.0, f64::max);
        if raw_max > 0.0 {
            let scale = profile.peak_intensity() / raw_max;
            let envelope_color = RGBColor(220, 50, 47);
            chart
                .draw_series(LineSeries::new(
                    profile
                        .positions()
                        .iter()
                        .zip(&envelope)
                        .map(|(x, e)| (x * MM, e * scale)),
                    envelope_color.mix(0.7).stroke_width(1),
                ))
                .map_err(plot_err)?
                .label("single-slit envelope")
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], envelope_color));
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    let info = format!(
        "λ = {:.0} nm, a = {:.0} µm, d = {:.0} µm, D = {:.2} m",
        config.wavelength() * 1e9,
        config.slit_width() * 1e6,
        config.slit_separation() * 1e6,
        config.screen_distance()
    );
    upper
        .draw(&Text::new(info, (80, 50), ("sans-serif", 14).into_font().color(&BLACK)))
        .map_err(plot_err)?;

    draw_fringe_strip(&lower, profile, wavelength_color(config.wavelength()))
}

/// 屏幕上看到的条纹色带
fn draw_fringe_strip<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    profile: &IntensityProfile,
    color: RGBColor,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (x_min, x_max) = profile.domain();
    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .margin_top(0)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min * MM..x_max * MM, 0.0..1.0)
        .map_err(plot_err)?;

    let peak = profile.peak_intensity();
    let scale = if peak > 0.0 { 1.0 / peak } else { 0.0 };
    let positions = profile.positions();
    let intensities = profile.intensities();

    chart
        .draw_series((0..positions.len()).map(|i| {
            // 每个采样点占据到相邻点的中点
            let left = if i == 0 { positions[0] } else { 0.5 * (positions[i - 1] + positions[i]) };
            let right = if i + 1 == positions.len() {
                positions[i]
            } else {
                0.5 * (positions[i] + positions[i + 1])
            };
            let level = (intensities[i] * scale).clamp(0.0, 1.0);
            let shade = RGBColor(
                (color.0 as f64 * level) as u8,
                (color.1 as f64 * level) as u8,
                (color.2 as f64 * level) as u8,
            );
            Rectangle::new([(left * MM, 0.0), (right * MM, 1.0)], shade.filled())
        }))
        .map_err(plot_err)?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 实测与理论对比
// ─────────────────────────────────────────────────────────────

/// 生成实测/理论叠加图
pub fn generate_comparison_plot(
    measured: &IntensityProfile,
    theoretical: &IntensityProfile,
    measured_peaks: &[f64],
    options: &ChartOptions,
    output_path: &Path,
) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_comparison_chart(&root, measured, theoretical, measured_peaks, &options.title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_comparison_chart(&root, measured, theoretical, measured_peaks, &options.title)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_comparison_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    measured: &IntensityProfile,
    theoretical: &IntensityProfile,
    measured_peaks: &[f64],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (m_min, m_max) = measured.domain();
    let (t_min, t_max) = theoretical.domain();
    let x_min = m_min.min(t_min);
    let x_max = m_max.max(t_max);
    let y_max = measured.peak_intensity().max(theoretical.peak_intensity()).max(f64::MIN_POSITIVE) * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min * MM..x_max * MM, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Screen position (mm)")
        .y_desc("Normalized intensity")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    let theory_color = RGBColor(0, 102, 204);
    let measured_color = RGBColor(230, 97, 1);

    chart
        .draw_series(LineSeries::new(
            theoretical.points().map(|(x, y)| (x * MM, y)),
            theory_color.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("theory")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], theory_color.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            measured.points().map(|(x, y)| (x * MM, y)),
            measured_color.stroke_width(1),
        ))
        .map_err(plot_err)?
        .label("measured")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], measured_color));

    // 标出检测到的实测峰位
    chart
        .draw_series(measured_peaks.iter().map(|&p| {
            PathElement::new(vec![(p * MM, 0.0), (p * MM, y_max)], BLACK.mix(0.3))
        }))
        .map_err(plot_err)?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 参数扫描
// ─────────────────────────────────────────────────────────────

/// 生成参数扫描曲线族
pub fn generate_sweep_plot(
    points: &[SweepPoint],
    parameter: Parameter,
    options: &ChartOptions,
    output_path: &Path,
) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_sweep_chart(&root, points, parameter, &options.title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_sweep_chart(&root, points, parameter, &options.title)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_sweep_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[SweepPoint],
    parameter: Parameter,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (x_min, x_max) = points
        .iter()
        .map(|p| p.profile.domain())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
    if !(x_min < x_max) {
        return Err(SlitError::PlotError("nothing to plot".to_string()));
    }

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min * MM..x_max * MM, 0.0..1.1)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Screen position (mm)")
        .y_desc("Normalized intensity")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    for (i, point) in points.iter().enumerate() {
        let color = match parameter {
            Parameter::Wavelength => wavelength_color(point.value),
            _ => {
                let (r, g, b) = Palette99::pick(i).rgb();
                RGBColor(r, g, b)
            }
        };

        chart
            .draw_series(LineSeries::new(
                point.profile.points().map(|(x, y)| (x * MM, y)),
                color.stroke_width(2),
            ))
            .map_err(plot_err)?
            .label(format_parameter_value(parameter, point.value))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

/// 图例中的参数取值
pub fn format_parameter_value(parameter: Parameter, value: f64) -> String {
    match parameter {
        Parameter::Wavelength => format!("λ = {:.0} nm", value * 1e9),
        Parameter::SlitWidth => format!("a = {:.1} µm", value * 1e6),
        Parameter::SlitSeparation => format!("d = {:.1} µm", value * 1e6),
        Parameter::ScreenDistance => format!("D = {:.2} m", value),
    }
}

/// 可见光波长的近似显示颜色；可见光范围外取灰色
pub fn wavelength_color(wavelength: f64) -> RGBColor {
    let nm = wavelength * 1e9;
    let (r, g, b) = match nm {
        x if (380.0..440.0).contains(&x) => ((440.0 - x) / 60.0, 0.0, 1.0),
        x if (440.0..490.0).contains(&x) => (0.0, (x - 440.0) / 50.0, 1.0),
        x if (490.0..510.0).contains(&x) => (0.0, 1.0, (510.0 - x) / 20.0),
        x if (510.0..580.0).contains(&x) => ((x - 510.0) / 70.0, 1.0, 0.0),
        x if (580.0..645.0).contains(&x) => (1.0, (645.0 - x) / 65.0, 0.0),
        x if (645.0..=780.0).contains(&x) => (1.0, 0.0, 0.0),
        _ => return RGBColor(128, 128, 128),
    };
    RGBColor((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wavelength_color() {
        assert_eq!(wavelength_color(650e-9), RGBColor(255, 0, 0));
        assert_eq!(wavelength_color(532e-9).1, 255);
        assert_eq!(wavelength_color(450e-9).2, 255);
        assert_eq!(wavelength_color(1064e-9), RGBColor(128, 128, 128));
    }

    #[test]
    fn test_format_parameter_value() {
        assert_eq!(format_parameter_value(Parameter::Wavelength, 532e-9), "λ = 532 nm");
        assert_eq!(format_parameter_value(Parameter::SlitSeparation, 200e-6), "d = 200.0 µm");
        assert_eq!(format_parameter_value(Parameter::ScreenDistance, 1.5), "D = 1.50 m");
    }
}
