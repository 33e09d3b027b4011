//! # 理论/实验比较结果
//!
//! 由 `analysis/compare.rs` 每次调用重新计算，不做持久化。
//!
//! ## 依赖关系
//! - 被 `analysis/compare.rs` 生成
//! - 被 `commands/compare.rs`, `optics/export.rs` 使用

use serde::Serialize;

/// 比较结果
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    /// Pearson 相关系数 [-1, 1]
    pub correlation: f64,
    /// 均方根误差
    pub rms_error: f64,
    /// 参与比较的采样点数
    pub compared_points: usize,
    /// 两分布重叠区间 (min, max)
    pub overlap: (f64, f64),
    /// 实验峰位（按坐标升序）
    pub measured_peaks: Vec<f64>,
    /// 实验谷位
    pub measured_troughs: Vec<f64>,
    /// 理论峰位
    pub theoretical_peaks: Vec<f64>,
    /// 理论谷位
    pub theoretical_troughs: Vec<f64>,
    /// 实验条纹间距估计（峰数不足时为 None）
    pub measured_fringe_spacing: Option<f64>,
    /// 理论条纹间距估计
    pub theoretical_fringe_spacing: Option<f64>,
    /// 实验条纹可见度
    pub visibility: Option<f64>,
}

impl ComparisonResult {
    /// 指标名 → 数值（仅标量，按固定顺序）
    pub fn metrics(&self) -> Vec<(&'static str, f64)> {
        let mut metrics = vec![
            ("correlation", self.correlation),
            ("rms_error", self.rms_error),
            ("compared_points", self.compared_points as f64),
            ("measured_peak_count", self.measured_peaks.len() as f64),
            ("theoretical_peak_count", self.theoretical_peaks.len() as f64),
        ];
        if let Some(s) = self.measured_fringe_spacing {
            metrics.push(("measured_fringe_spacing", s));
        }
        if let Some(s) = self.theoretical_fringe_spacing {
            metrics.push(("theoretical_fringe_spacing", s));
        }
        if let Some(v) = self.visibility {
            metrics.push(("visibility", v));
        }
        metrics
    }

    /// 实验与理论条纹间距的相对偏差
    pub fn spacing_relative_error(&self) -> Option<f64> {
        match (self.measured_fringe_spacing, self.theoretical_fringe_spacing) {
            (Some(m), Some(t)) if t > 0.0 => Some((m - t).abs() / t),
            _ => None,
        }
    }
}
