//! # 理论与实验图样比较
//!
//! ## 算法概述
//! 1. 求两分布坐标范围的重叠区间，不重叠即报 IncompatibleDomains
//! 2. 坐标网格一致（逐点偏差 ≤ grid_tolerance × 平均采样间隔）时直接对齐；
//!    否则把理论曲线线性插值到实验坐标上，只保留重叠区间内的点
//! 3. 对齐后的两序列计算 Pearson 相关系数与 RMS 误差
//! 4. 分别检测峰谷、估计条纹间距与实验可见度（失败时对应字段为 None）
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs` 调用
//! - 使用 `analysis/signal.rs`, `analysis/interpolate.rs`
//! - 生成 `models/comparison.rs` 的 ComparisonResult

use crate::analysis::interpolate;
use crate::analysis::signal::{self, AnalyzerSettings};
use crate::error::{Result, SlitError};
use crate::models::{ComparisonResult, IntensityProfile};

/// 将实验分布与理论分布比较
pub fn compare_with_theory(
    measured: &IntensityProfile,
    theoretical: &IntensityProfile,
    settings: &AnalyzerSettings,
) -> Result<ComparisonResult> {
    let (m_min, m_max) = measured.domain();
    let (t_min, t_max) = theoretical.domain();
    let incompatible = |reason: &str| SlitError::IncompatibleDomains {
        a_min: m_min,
        a_max: m_max,
        b_min: t_min,
        b_max: t_max,
        reason: reason.to_string(),
    };

    let lo = m_min.max(t_min);
    let hi = m_max.min(t_max);
    if lo >= hi {
        return Err(incompatible("do not overlap"));
    }

    let (a, b): (Vec<f64>, Vec<f64>) = if same_grid(measured, theoretical, settings.grid_tolerance) {
        (
            measured.intensities().to_vec(),
            theoretical.intensities().to_vec(),
        )
    } else {
        measured
            .points()
            .filter_map(|(x, y)| {
                interpolate::linear_at(theoretical.positions(), theoretical.intensities(), x)
                    .map(|t| (y, t))
            })
            .unzip()
    };

    if a.len() < 2 {
        return Err(incompatible("share fewer than 2 samples"));
    }

    let correlation = pearson(&a, &b)?;
    let rms_error = rms(&a, &b);

    let measured_extrema = signal::find_peaks_and_minima(measured, settings);
    let theoretical_extrema = signal::find_peaks_and_minima(theoretical, settings);

    Ok(ComparisonResult {
        correlation,
        rms_error,
        compared_points: a.len(),
        overlap: (lo, hi),
        measured_peaks: measured_extrema.peak_positions(),
        measured_troughs: measured_extrema.trough_positions(),
        theoretical_peaks: theoretical_extrema.peak_positions(),
        theoretical_troughs: theoretical_extrema.trough_positions(),
        measured_fringe_spacing: signal::estimate_fringe_spacing(measured, settings).ok(),
        theoretical_fringe_spacing: signal::estimate_fringe_spacing(theoretical, settings).ok(),
        visibility: signal::visibility(measured, settings).ok(),
    })
}

/// 两套坐标是否可视为同一网格
fn same_grid(a: &IntensityProfile, b: &IntensityProfile, tolerance: f64) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let spacing = a.sample_spacing().unwrap_or(0.0);
    let limit = tolerance * spacing;
    a.positions()
        .iter()
        .zip(b.positions())
        .all(|(x, y)| (x - y).abs() <= limit)
}

/// Pearson 相关系数
pub fn pearson(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = a.len().min(b.len()) as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return Err(SlitError::DegenerateSignal(
            "zero variance in compared intensities".to_string(),
        ));
    }

    // 同一序列时 sqrt(v·v) == v，结果恰为 1
    Ok((cov / (var_a * var_b).sqrt()).clamp(-1.0, 1.0))
}

/// 均方根误差
pub fn rms(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    (sum / n as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OpticalConfiguration;
    use crate::optics::engine;

    #[test]
    fn test_compare_with_itself() {
        let config = OpticalConfiguration::default();
        for resolution in [101, 500, 999, 1000, 1234, 2001, 4096] {
            let profile = engine::simulate_experiment(&config, 0.01, resolution).unwrap();

            let result =
                compare_with_theory(&profile, &profile, &AnalyzerSettings::default()).unwrap();
            assert_eq!(result.correlation, 1.0, "resolution {}", resolution);
            assert_eq!(result.rms_error, 0.0);
            assert_eq!(result.compared_points, resolution);
            assert_eq!(result.measured_peaks, result.theoretical_peaks);
        }
    }

    #[test]
    fn test_pearson_of_identical_series() {
        let a: Vec<f64> = (0..1000).map(|i| ((i as f64) * 0.37).sin().powi(2)).collect();
        assert_eq!(pearson(&a, &a).unwrap(), 1.0);

        let negated: Vec<f64> = a.iter().map(|v| 1.0 - v).collect();
        assert!((pearson(&a, &negated).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compare_noisy_measurement() {
        let config = OpticalConfiguration::default();
        let theory = engine::simulate_experiment(&config, 0.01, 500).unwrap();

        let noisy: Vec<f64> = theory
            .intensities()
            .iter()
            .enumerate()
            .map(|(i, v)| (v + 0.1 * (((i * 7919) % 101) as f64 / 100.0 - 0.5)).clamp(0.0, 1.0))
            .collect();
        let measured = IntensityProfile::new(theory.positions().to_vec(), noisy).unwrap();

        let result = compare_with_theory(&measured, &theory, &AnalyzerSettings::default()).unwrap();
        assert!(result.correlation > 0.95, "correlation = {}", result.correlation);
        assert!(result.rms_error < 0.1, "rms = {}", result.rms_error);
    }

    #[test]
    fn test_compare_resamples_different_grid() {
        let config = OpticalConfiguration::default();
        let theory = engine::simulate_experiment(&config, 0.01, 4001).unwrap();
        let measured = engine::simulate_experiment(&config, 0.008, 401).unwrap();

        let result = compare_with_theory(&measured, &theory, &AnalyzerSettings::default()).unwrap();
        assert_eq!(result.compared_points, 401);
        assert!(result.correlation > 0.999);
        assert!(result.rms_error < 0.01);
        assert_eq!(result.overlap, (-0.004, 0.004));
    }

    #[test]
    fn test_compare_partial_overlap() {
        let theory = IntensityProfile::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        let measured =
            IntensityProfile::new(vec![1.5, 2.0, 2.5, 3.5, 4.0], vec![0.5, 0.1, 0.4, 0.9, 0.2]).unwrap();

        let result = compare_with_theory(&measured, &theory, &AnalyzerSettings::default()).unwrap();
        assert_eq!(result.compared_points, 3);
        assert_eq!(result.overlap, (1.5, 3.0));
    }

    #[test]
    fn test_compare_disjoint_domains() {
        let a = IntensityProfile::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let b = IntensityProfile::new(vec![2.0, 3.0], vec![0.0, 1.0]).unwrap();
        assert!(matches!(
            compare_with_theory(&a, &b, &AnalyzerSettings::default()),
            Err(SlitError::IncompatibleDomains { .. })
        ));
    }

    #[test]
    fn test_compare_flat_theory() {
        let a = IntensityProfile::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.5]).unwrap();
        let b = IntensityProfile::new(vec![0.0, 1.0, 2.0], vec![1.0, 1.0, 1.0]).unwrap();
        assert!(matches!(
            compare_with_theory(&a, &b, &AnalyzerSettings::default()),
            Err(SlitError::DegenerateSignal(_))
        ));
    }

    #[test]
    fn test_pearson_anticorrelated() {
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
        assert!((rms(&[1.0, 1.0], &[0.0, 2.0]) - 1.0).abs() < 1e-12);
    }
}
