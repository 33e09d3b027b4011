//! # 实验强度曲线处理
//!
//! 将原始强度序列归一化，并检测亮纹/暗纹、估计条纹间距与可见度。
//!
//! ## 极值判定规则
//! 采样点 i 被判为峰，需同时满足：
//! 1. 局部极大：严格大于左邻点与右邻点；等值平台视为一个极值，取平台中点
//!    （偶数宽度取偏左的中点），平台延伸到端点时不计
//! 2. 高度不低于 `min_height`
//! 3. 拓扑显著度大于 `prominence`：分别向左、向右走到第一个更高的点（或边界）为止，
//!    记录途中最低值，显著度 = 峰值 − 两侧最低值中较高者
//! 4. 与更高的峰相距不少于 `min_distance` 个采样点，否则被剔除
//!
//! 谷使用同一规则作用于取反后的信号，不施加高度限制。端点不视为极值。
//!
//! ## 依赖关系
//! - 被 `analysis/compare.rs`, `commands/compare.rs` 使用
//! - 使用 `models/profile.rs` 的 IntensityProfile

use crate::error::{Result, SlitError};
use crate::models::IntensityProfile;
use crate::optics::engine;

/// 分析阈值设置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerSettings {
    /// 峰/谷最小显著度（归一化强度单位）
    pub prominence: f64,
    /// 峰最小高度
    pub min_height: f64,
    /// 相邻峰最小间隔（采样点）
    pub min_distance: usize,
    /// 可见度统计窗口内的亮纹数
    pub visibility_fringes: usize,
    /// 判定两套坐标相同的容差（相对平均采样间隔）
    pub grid_tolerance: f64,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            prominence: 0.05,
            min_height: 0.1,
            min_distance: 3,
            visibility_fringes: 3,
            grid_tolerance: 1e-6,
        }
    }
}

/// 单个极值点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    /// 采样下标
    pub index: usize,
    pub position: f64,
    pub intensity: f64,
    pub prominence: f64,
}

/// 峰与谷（均按坐标升序）
#[derive(Debug, Clone, Default)]
pub struct Extrema {
    pub peaks: Vec<Extremum>,
    pub troughs: Vec<Extremum>,
}

impl Extrema {
    pub fn peak_positions(&self) -> Vec<f64> {
        self.peaks.iter().map(|p| p.position).collect()
    }

    pub fn trough_positions(&self) -> Vec<f64> {
        self.troughs.iter().map(|t| t.position).collect()
    }
}

/// 线性拉伸到 [0, 1]，坐标取采样下标
pub fn normalize(raw: &[f64]) -> Result<IntensityProfile> {
    let values = rescale(raw)?;
    let positions = (0..values.len()).map(|i| i as f64).collect();
    IntensityProfile::new(positions, values)
}

/// 线性拉伸到 [0, 1]，使用给定坐标
pub fn normalize_with_positions(positions: Vec<f64>, raw: &[f64]) -> Result<IntensityProfile> {
    let values = rescale(raw)?;
    IntensityProfile::new(positions, values)
}

/// 线性拉伸到 [0, 1]，采样点均匀铺满屏宽 [-W/2, W/2]
pub fn normalize_on_screen(raw: &[f64], screen_width: f64) -> Result<IntensityProfile> {
    let values = rescale(raw)?;
    let positions = engine::screen_positions(screen_width, values.len())?;
    IntensityProfile::new(positions, values)
}

fn rescale(raw: &[f64]) -> Result<Vec<f64>> {
    if raw.is_empty() {
        return Err(SlitError::MalformedProfile("empty trace".to_string()));
    }
    if let Some(i) = raw.iter().position(|v| !v.is_finite()) {
        return Err(SlitError::MalformedProfile(format!(
            "non-finite sample at index {}",
            i
        )));
    }

    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return Err(SlitError::DegenerateSignal(format!(
            "flat trace, all {} samples equal {}",
            raw.len(),
            min
        )));
    }

    let span = max - min;
    Ok(raw.iter().map(|v| (v - min) / span).collect())
}

/// 检测峰与谷
pub fn find_peaks_and_minima(profile: &IntensityProfile, settings: &AnalyzerSettings) -> Extrema {
    let values = profile.intensities();
    let positions = profile.positions();

    let to_extremum = |(index, prominence): (usize, f64)| Extremum {
        index,
        position: positions[index],
        intensity: values[index],
        prominence,
    };

    let peaks = detect(
        values,
        settings.prominence,
        Some(settings.min_height),
        settings.min_distance,
    );

    let inverted: Vec<f64> = values.iter().map(|v| -v).collect();
    let troughs = detect(&inverted, settings.prominence, None, settings.min_distance);

    Extrema {
        peaks: peaks.into_iter().map(to_extremum).collect(),
        troughs: troughs.into_iter().map(to_extremum).collect(),
    }
}

/// 相邻亮纹平均间距
pub fn estimate_fringe_spacing(profile: &IntensityProfile, settings: &AnalyzerSettings) -> Result<f64> {
    let peaks = find_peaks_and_minima(profile, settings).peak_positions();
    if peaks.len() < 2 {
        return Err(SlitError::InsufficientPeaks {
            found: peaks.len(),
            required: 2,
        });
    }

    let total: f64 = peaks.windows(2).map(|w| w[1] - w[0]).sum();
    Ok(total / (peaks.len() - 1) as f64)
}

/// 条纹可见度 (Imax − Imin) / (Imax + Imin)
///
/// 统计窗口以最亮的峰为中心，包含 `visibility_fringes` 个峰，两端延伸到相邻的谷
/// （没有谷时延伸到曲线端点）。
pub fn visibility(profile: &IntensityProfile, settings: &AnalyzerSettings) -> Result<f64> {
    let extrema = find_peaks_and_minima(profile, settings);
    let peaks = &extrema.peaks;
    if peaks.is_empty() {
        return Err(SlitError::InsufficientPeaks {
            found: 0,
            required: 1,
        });
    }

    let brightest = peaks
        .iter()
        .enumerate()
        .fold(0, |best, (i, p)| if p.intensity > peaks[best].intensity { i } else { best });

    let count = settings.visibility_fringes.clamp(1, peaks.len());
    let mut start = brightest.saturating_sub((count - 1) / 2);
    if start + count > peaks.len() {
        start = peaks.len() - count;
    }
    let first = peaks[start].index;
    let last = peaks[start + count - 1].index;

    let values = profile.intensities();
    let lo = extrema
        .troughs
        .iter()
        .rev()
        .find(|t| t.index < first)
        .map_or(0, |t| t.index);
    let hi = extrema
        .troughs
        .iter()
        .find(|t| t.index > last)
        .map_or(values.len() - 1, |t| t.index);

    let window = &values[lo..=hi];
    let i_max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let i_min = window.iter().copied().fold(f64::INFINITY, f64::min);

    if i_max + i_min <= 0.0 {
        return Err(SlitError::DegenerateSignal(
            "zero intensity in visibility window".to_string(),
        ));
    }
    Ok((i_max - i_min) / (i_max + i_min))
}

/// 返回 (下标, 显著度)，按下标升序
fn detect(
    values: &[f64],
    min_prominence: f64,
    min_height: Option<f64>,
    min_distance: usize,
) -> Vec<(usize, f64)> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    let mut i = 1;
    while i < n - 1 {
        let v = values[i];
        if v <= values[i - 1] {
            i += 1;
            continue;
        }

        // 等值平台的右端
        let mut right = i;
        while right + 1 < n && values[right + 1] == v {
            right += 1;
        }
        if right + 1 == n || values[right + 1] > v {
            i = right + 1;
            continue;
        }

        let mid = (i + right) / 2;
        i = right + 1;
        if min_height.is_some_and(|h| v < h) {
            continue;
        }
        let p = prominence(values, mid);
        if p > min_prominence {
            candidates.push((mid, p));
        }
    }

    thin_by_distance(values, candidates, min_distance)
}

fn prominence(values: &[f64], i: usize) -> f64 {
    let v = values[i];

    let mut left_base = v;
    for &x in values[..i].iter().rev() {
        if x > v {
            break;
        }
        left_base = left_base.min(x);
    }

    let mut right_base = v;
    for &x in &values[i + 1..] {
        if x > v {
            break;
        }
        right_base = right_base.min(x);
    }

    v - left_base.max(right_base)
}

/// 高峰优先，剔除距离已保留峰过近的候选
fn thin_by_distance(
    values: &[f64],
    candidates: Vec<(usize, f64)>,
    min_distance: usize,
) -> Vec<(usize, f64)> {
    if min_distance <= 1 || candidates.len() < 2 {
        return candidates;
    }

    let mut by_height = candidates;
    by_height.sort_by(|a, b| values[b.0].total_cmp(&values[a.0]).then(a.0.cmp(&b.0)));

    let mut kept: Vec<(usize, f64)> = Vec::with_capacity(by_height.len());
    for candidate in by_height {
        if kept
            .iter()
            .all(|k| k.0.abs_diff(candidate.0) >= min_distance)
        {
            kept.push(candidate);
        }
    }

    kept.sort_by_key(|k| k.0);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OpticalConfiguration;
    use std::f64::consts::PI;

    /// cos²(πx/s) 在 [-0.01, 0.01] 上 1001 点采样，亮纹正好落在采样点上
    fn cosine_profile(noise: bool) -> IntensityProfile {
        let positions = engine::screen_positions(0.02, 1001).unwrap();
        let values = positions
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let c = (PI * x / 0.002).cos();
                let ripple = if noise {
                    0.02 * (((i * 37) % 17) as f64 / 16.0 - 0.5)
                } else {
                    0.0
                };
                (c * c + ripple).max(0.0)
            })
            .collect();
        IntensityProfile::new(positions, values).unwrap()
    }

    #[test]
    fn test_normalize() {
        let profile = normalize(&[2.0, 4.0, 6.0, 8.0]).unwrap();
        let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
        for (v, e) in profile.intensities().iter().zip(expected) {
            assert!((v - e).abs() < 1e-12);
        }
        assert_eq!(profile.positions(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_normalize_flat_signal() {
        assert!(matches!(
            normalize(&[5.0, 5.0, 5.0]),
            Err(SlitError::DegenerateSignal(_))
        ));
        assert!(matches!(normalize(&[]), Err(SlitError::MalformedProfile(_))));
        assert!(matches!(
            normalize(&[1.0, f64::NAN]),
            Err(SlitError::MalformedProfile(_))
        ));
    }

    #[test]
    fn test_normalize_on_screen() {
        let profile = normalize_on_screen(&[10.0, 30.0, 20.0], 0.02).unwrap();
        assert_eq!(profile.positions(), &[-0.01, 0.0, 0.01]);
        assert_eq!(profile.intensities(), &[0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_find_clean_fringes() {
        let profile = cosine_profile(false);
        let extrema = find_peaks_and_minima(&profile, &AnalyzerSettings::default());

        // 端点 x = ±0.01 处的亮纹不计
        assert_eq!(extrema.peaks.len(), 9);
        assert_eq!(extrema.troughs.len(), 10);
        for (m, peak) in (-4..=4).zip(&extrema.peaks) {
            assert!((peak.position - m as f64 * 0.002).abs() < 1e-12);
            assert!(peak.prominence > 0.99);
        }

        let mean_peak: f64 =
            extrema.peaks.iter().map(|p| p.intensity).sum::<f64>() / extrema.peaks.len() as f64;
        let mean_trough: f64 = extrema.troughs.iter().map(|t| t.intensity).sum::<f64>()
            / extrema.troughs.len() as f64;
        assert!(mean_peak > mean_trough);
    }

    #[test]
    fn test_prominence_rejects_ripple() {
        let profile = cosine_profile(true);

        let strict = find_peaks_and_minima(&profile, &AnalyzerSettings::default());
        assert_eq!(strict.peaks.len(), 9);

        let loose = AnalyzerSettings {
            prominence: 0.0,
            min_distance: 1,
            ..AnalyzerSettings::default()
        };
        let noisy = find_peaks_and_minima(&profile, &loose);
        assert!(noisy.peaks.len() > 9);
    }

    #[test]
    fn test_min_distance_keeps_taller_peak() {
        let positions: Vec<f64> = (0..9).map(|i| i as f64).collect();
        let values = vec![0.0, 0.2, 0.9, 0.3, 1.0, 0.2, 0.0, 0.0, 0.0];
        let profile = IntensityProfile::new(positions, values).unwrap();

        let settings = AnalyzerSettings {
            min_distance: 3,
            ..AnalyzerSettings::default()
        };
        let extrema = find_peaks_and_minima(&profile, &settings);
        assert_eq!(extrema.peak_positions(), vec![4.0]);

        let settings = AnalyzerSettings {
            min_distance: 1,
            ..AnalyzerSettings::default()
        };
        let extrema = find_peaks_and_minima(&profile, &settings);
        assert_eq!(extrema.peak_positions(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_saturated_peak_reported_at_center() {
        let positions: Vec<f64> = (0..11).map(|i| i as f64).collect();
        let values = vec![0.0, 0.2, 0.6, 1.0, 1.0, 1.0, 1.0, 1.0, 0.6, 0.2, 0.0];
        let profile = IntensityProfile::new(positions, values).unwrap();

        let extrema = find_peaks_and_minima(&profile, &AnalyzerSettings::default());
        assert_eq!(extrema.peak_positions(), vec![5.0]);
        assert_eq!(extrema.peaks[0].prominence, 1.0);
    }

    #[test]
    fn test_flat_trough_and_shoulder() {
        // 暗纹底部为 3 点平台；x = 8..9 为上升途中的台阶，不是峰
        let positions: Vec<f64> = (0..14).map(|i| i as f64).collect();
        let values = vec![
            0.0, 1.0, 0.5, 0.1, 0.1, 0.1, 0.5, 0.7, 0.8, 0.8, 1.0, 0.4, 0.0, 0.0,
        ];
        let profile = IntensityProfile::new(positions, values).unwrap();

        let settings = AnalyzerSettings {
            min_distance: 1,
            ..AnalyzerSettings::default()
        };
        let extrema = find_peaks_and_minima(&profile, &settings);
        assert_eq!(extrema.peak_positions(), vec![1.0, 10.0]);
        assert_eq!(extrema.trough_positions(), vec![4.0]);
    }

    #[test]
    fn test_spacing_recovers_bright_fringes() {
        let config = OpticalConfiguration::default();
        let centers = engine::bright_fringe_positions(&config, -3..=3);
        let spacing = engine::fringe_spacing(&config);

        let positions = engine::screen_positions(0.03, 3001).unwrap();
        let sigma: f64 = 0.3e-3;
        let values = positions
            .iter()
            .map(|x| {
                centers
                    .iter()
                    .map(|c| (-(x - c).powi(2) / (2.0 * sigma * sigma)).exp())
                    .sum()
            })
            .collect();
        let profile = IntensityProfile::new(positions, values).unwrap();

        let estimate = estimate_fringe_spacing(&profile, &AnalyzerSettings::default()).unwrap();
        let resolution = profile.sample_spacing().unwrap();
        assert!(
            (estimate - spacing).abs() <= resolution,
            "estimate {} vs {}",
            estimate,
            spacing
        );
    }

    #[test]
    fn test_spacing_needs_two_peaks() {
        let positions = engine::screen_positions(0.01, 101).unwrap();
        let values = positions
            .iter()
            .map(|x| (-(x / 1e-3).powi(2)).exp())
            .collect();
        let profile = IntensityProfile::new(positions, values).unwrap();

        assert!(matches!(
            estimate_fringe_spacing(&profile, &AnalyzerSettings::default()),
            Err(SlitError::InsufficientPeaks {
                found: 1,
                required: 2
            })
        ));
    }

    #[test]
    fn test_visibility_of_offset_fringes() {
        let positions = engine::screen_positions(0.02, 1001).unwrap();
        let values = positions
            .iter()
            .map(|x| 0.5 + 0.3 * (2.0 * PI * x / 0.002).cos())
            .collect();
        let profile = IntensityProfile::new(positions, values).unwrap();

        let v = visibility(&profile, &AnalyzerSettings::default()).unwrap();
        assert!((v - 0.6).abs() < 1e-6, "visibility = {}", v);
    }

    #[test]
    fn test_visibility_of_ideal_pattern() {
        let config = OpticalConfiguration::default();
        let profile = engine::simulate_experiment(&config, 0.02, 2001).unwrap();
        let v = visibility(&profile, &AnalyzerSettings::default()).unwrap();
        assert!(v > 0.95 && v <= 1.0);
    }

    #[test]
    fn test_visibility_without_peaks() {
        let profile = normalize(&[0.0, 0.5, 1.0]).unwrap();
        assert!(matches!(
            visibility(&profile, &AnalyzerSettings::default()),
            Err(SlitError::InsufficientPeaks { .. })
        ));
    }
}
