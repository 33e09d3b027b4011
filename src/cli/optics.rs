//! # 共享的光学与分析参数
//!
//! 各子命令通过 `#[command(flatten)]` 复用这些参数组。
//!
//! ## 依赖关系
//! - 被 `cli/simulate.rs`, `cli/compare.rs`, `cli/sweep.rs`, `cli/report.rs` 使用
//! - 使用 `utils/units.rs` 解析带单位的长度

use crate::analysis::AnalyzerSettings;
use crate::error::Result;
use crate::models::OpticalConfiguration;
use crate::optics::engine::SlitMode;
use crate::utils::units::{parse_length, parse_wavelength};

use clap::{Args, ValueEnum};
use std::path::Path;

// ─────────────────────────────────────────────────────────────
// 光学配置
// ─────────────────────────────────────────────────────────────

/// 光学配置参数（长度可带单位：nm, um, mm, cm, m）
#[derive(Args, Debug, Clone)]
pub struct OpticsArgs {
    /// Wavelength: length (e.g., 650nm) or laser name (red, he-ne, green, blue, violet)
    #[arg(short = 'l', long, default_value = "650nm", value_parser = parse_wavelength)]
    pub wavelength: f64,

    /// Width of each slit (a)
    #[arg(short = 'a', long, default_value = "50um", value_parser = parse_length)]
    pub slit_width: f64,

    /// Center-to-center slit separation (d)
    #[arg(short = 'd', long, default_value = "200um", value_parser = parse_length)]
    pub slit_separation: f64,

    /// Slit-to-screen distance (D)
    #[arg(short = 'D', long, default_value = "1m", value_parser = parse_length)]
    pub screen_distance: f64,
}

impl OpticsArgs {
    /// 构造并校验光学配置
    pub fn configuration(&self) -> Result<OpticalConfiguration> {
        OpticalConfiguration::new(
            self.wavelength,
            self.slit_width,
            self.slit_separation,
            self.screen_distance,
        )
    }
}

/// 缝的类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum SlitModeArg {
    /// Single slit (diffraction envelope only)
    Single,
    /// Double slit (envelope × interference)
    #[default]
    Double,
}

impl From<SlitModeArg> for SlitMode {
    fn from(arg: SlitModeArg) -> Self {
        match arg {
            SlitModeArg::Single => SlitMode::Single,
            SlitModeArg::Double => SlitMode::Double,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 输出
// ─────────────────────────────────────────────────────────────

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file (position, intensity)
    Csv,
    /// XY text data file with commented header
    Xy,
}

impl OutputFormat {
    /// 显式格式优先，否则按扩展名推断，默认 PNG
    pub fn resolve(format: Option<OutputFormat>, path: &Path) -> OutputFormat {
        format.unwrap_or_else(|| Self::from_extension(path))
    }

    fn from_extension(path: &Path) -> OutputFormat {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("svg") => OutputFormat::Svg,
            Some("csv") => OutputFormat::Csv,
            Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
            _ => OutputFormat::Png,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 峰谷检测
// ─────────────────────────────────────────────────────────────

/// 峰谷检测阈值
#[derive(Args, Debug, Clone)]
pub struct AnalyzerArgs {
    /// Minimum peak prominence (normalized intensity)
    #[arg(long, default_value_t = 0.05)]
    pub prominence: f64,

    /// Minimum peak height (normalized intensity)
    #[arg(long, default_value_t = 0.1)]
    pub min_height: f64,

    /// Minimum distance between peaks (samples)
    #[arg(long, default_value_t = 3)]
    pub min_distance: usize,

    /// Number of fringes around the brightest peak used for visibility
    #[arg(long, default_value_t = 3)]
    pub visibility_fringes: usize,

    /// Relative tolerance (fraction of sample spacing) for treating two grids as identical
    #[arg(long, default_value_t = 1e-6)]
    pub grid_tolerance: f64,
}

impl AnalyzerArgs {
    pub fn settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            prominence: self.prominence,
            min_height: self.min_height,
            min_distance: self.min_distance,
            visibility_fringes: self.visibility_fringes,
            grid_tolerance: self.grid_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(OutputFormat::resolve(None, Path::new("a.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::resolve(None, Path::new("a.CSV")), OutputFormat::Csv);
        assert_eq!(OutputFormat::resolve(None, Path::new("a.dat")), OutputFormat::Xy);
        assert_eq!(OutputFormat::resolve(None, Path::new("pattern")), OutputFormat::Png);
        assert_eq!(
            OutputFormat::resolve(Some(OutputFormat::Csv), Path::new("a.png")),
            OutputFormat::Csv
        );
    }
}
