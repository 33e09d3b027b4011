//! # 图样数据导出
//!
//! ## 支持格式
//! - CSV: position_m, intensity（单条图样）；parameter, value, position_m, intensity（扫描族）
//! - XY: 以 `#` 开头的配置说明 + 制表符分隔的两列数据
//! - 比较汇总 CSV：每个实测文件一行，由 serde 序列化
//!
//! ## 依赖关系
//! - 被 `commands/simulate.rs`, `commands/sweep.rs`, `commands/compare.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, SlitError};
use crate::models::{ComparisonResult, IntensityProfile, OpticalConfiguration, Parameter};
use crate::optics::sweep::SweepPoint;

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// 比较汇总中的一行
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub file: String,
    pub points: usize,
    pub correlation: f64,
    pub rms_error: f64,
    pub measured_peaks: usize,
    pub measured_spacing_m: Option<f64>,
    pub theoretical_spacing_m: Option<f64>,
    pub visibility: Option<f64>,
}

impl ComparisonSummary {
    pub fn new(file: impl Into<String>, result: &ComparisonResult) -> Self {
        Self {
            file: file.into(),
            points: result.compared_points,
            correlation: result.correlation,
            rms_error: result.rms_error,
            measured_peaks: result.measured_peaks.len(),
            measured_spacing_m: result.measured_fringe_spacing,
            theoretical_spacing_m: result.theoretical_fringe_spacing,
            visibility: result.visibility,
        }
    }
}

fn write_error(path: &Path, source: std::io::Error) -> SlitError {
    SlitError::FileWriteError {
        path: path.display().to_string(),
        source,
    }
}

/// 导出单条图样为 CSV
pub fn profile_to_csv(profile: &IntensityProfile, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    wtr.write_record(["position_m", "intensity"])?;

    for (x, y) in profile.points() {
        wtr.write_record(&[format!("{:.6e}", x), format!("{:.6}", y)])?;
    }

    wtr.flush().map_err(|e| write_error(output_path, e))
}

/// 导出单条图样为 XY 文本
pub fn profile_to_xy(
    profile: &IntensityProfile,
    config: &OpticalConfiguration,
    title: &str,
    output_path: &Path,
) -> Result<()> {
    let mut text = String::new();
    // 写入 String 不会失败
    let _ = writeln!(text, "# {}", title);
    let _ = writeln!(
        text,
        "# wavelength = {:e} m, slit width = {:e} m, slit separation = {:e} m, screen distance = {:e} m",
        config.wavelength(),
        config.slit_width(),
        config.slit_separation(),
        config.screen_distance()
    );
    let _ = writeln!(text, "# Columns: position (m), intensity (relative)");
    let _ = writeln!(text, "#");

    for (x, y) in profile.points() {
        let _ = writeln!(text, "{:.6e}\t{:.6}", x, y);
    }

    std::fs::write(output_path, text).map_err(|e| write_error(output_path, e))
}

/// 导出扫描族为长表 CSV
pub fn sweep_to_csv(points: &[SweepPoint], parameter: Parameter, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    wtr.write_record(["parameter", "value", "position_m", "intensity"])?;

    let name = parameter.to_string();
    for point in points {
        for (x, y) in point.profile.points() {
            wtr.write_record(&[
                name.clone(),
                format!("{:e}", point.value),
                format!("{:.6e}", x),
                format!("{:.6}", y),
            ])?;
        }
    }

    wtr.flush().map_err(|e| write_error(output_path, e))
}

/// 导出批量比较汇总
pub fn comparisons_to_csv(rows: &[ComparisonSummary], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| write_error(output_path, e))
}
