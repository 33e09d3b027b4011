//! # Fraunhofer 衍射/干涉强度计算
//!
//! 实现单缝衍射与双缝干涉图样的闭式计算。
//!
//! ## 算法概述
//! 1. 屏上坐标 y → 衍射角 θ = atan(y/D)（真实几何角，不做 sinθ ≈ θ）
//! 2. 单缝衍射项 β = π·a·sinθ/λ，I₁ = (sinβ/β)²
//! 3. 双缝干涉项 δ = π·d·sinθ/λ，I₂ = I₁·cos²δ
//! 4. 条纹间距等推导量采用小角近似 Δy = λD/d
//!
//! β = 0 时 sinβ/β 取解析极限 1。θ 由 atan 给出，落在 (-π/2, π/2) 内，
//! 因此 sinθ = 0 只出现在中心，不存在其它奇点。
//!
//! ## 依赖关系
//! - 被 `commands/simulate.rs`, `commands/compare.rs`, `optics/sweep.rs` 调用
//! - 使用 `models/configuration.rs` 的 OpticalConfiguration
//! - 生成 `models/profile.rs` 的 IntensityProfile

use crate::error::{Result, SlitError};
use crate::models::{ConfigWarning, IntensityProfile, OpticalConfiguration};

use std::f64::consts::PI;
use std::ops::RangeInclusive;

/// 小角近似的最大可信衍射角（rad）
pub const SMALL_ANGLE_LIMIT: f64 = 0.1;

/// 缝的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlitMode {
    Single,
    #[default]
    Double,
}

impl std::fmt::Display for SlitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlitMode::Single => write!(f, "single-slit"),
            SlitMode::Double => write!(f, "double-slit"),
        }
    }
}

/// 强度归一化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// 窗口内最大值归一为 1
    #[default]
    Peak,
    /// 保留公式原始单位（中心处为 1）
    Raw,
}

/// 衍射角 θ = atan(y/D)
pub fn diffraction_angle(position: f64, screen_distance: f64) -> f64 {
    (position / screen_distance).atan()
}

/// 单缝包络 (sinβ/β)²
pub fn sinc_squared(beta: f64) -> f64 {
    if beta == 0.0 {
        return 1.0;
    }
    let s = beta.sin() / beta;
    s * s
}

/// 给定衍射角的单缝强度
pub fn single_slit_at_angle(theta: f64, config: &OpticalConfiguration) -> f64 {
    let beta = PI * config.slit_width() * theta.sin() / config.wavelength();
    sinc_squared(beta)
}

/// 给定衍射角的双缝强度
pub fn double_slit_at_angle(theta: f64, config: &OpticalConfiguration) -> f64 {
    let sin_theta = theta.sin();
    let delta = PI * config.slit_separation() * sin_theta / config.wavelength();
    let interference = delta.cos();
    single_slit_at_angle(theta, config) * interference * interference
}

/// 单缝衍射强度
pub fn single_slit_intensity(positions: &[f64], config: &OpticalConfiguration) -> Vec<f64> {
    positions
        .iter()
        .map(|&y| single_slit_at_angle(diffraction_angle(y, config.screen_distance()), config))
        .collect()
}

/// 双缝干涉强度（单缝包络调制）
pub fn double_slit_intensity(positions: &[f64], config: &OpticalConfiguration) -> Vec<f64> {
    positions
        .iter()
        .map(|&y| double_slit_at_angle(diffraction_angle(y, config.screen_distance()), config))
        .collect()
}

/// 按缝类型计算强度
pub fn intensity(positions: &[f64], config: &OpticalConfiguration, mode: SlitMode) -> Vec<f64> {
    match mode {
        SlitMode::Single => single_slit_intensity(positions, config),
        SlitMode::Double => double_slit_intensity(positions, config),
    }
}

/// [-W/2, W/2] 上的等距采样点
///
/// 以整数分子构造坐标，保证 x[i] 与 x[n-1-i] 严格互为相反数，端点精确等于 ±W/2。
pub fn screen_positions(screen_width: f64, resolution: usize) -> Result<Vec<f64>> {
    if !screen_width.is_finite() || screen_width <= 0.0 {
        return Err(SlitError::invalid_parameter(
            "screen_width",
            screen_width,
            "must be > 0",
        ));
    }
    if resolution < 2 {
        return Err(SlitError::invalid_parameter(
            "resolution",
            resolution as f64,
            "must be >= 2",
        ));
    }

    let half = screen_width / 2.0;
    let intervals = (resolution - 1) as f64;
    Ok((0..resolution)
        .map(|i| {
            let k = 2.0 * i as f64 - intervals;
            half * (k / intervals)
        })
        .collect())
}

/// 在给定坐标上计算强度分布
pub fn profile_at(
    positions: Vec<f64>,
    config: &OpticalConfiguration,
    mode: SlitMode,
    normalization: Normalization,
) -> Result<IntensityProfile> {
    let mut intensities = intensity(&positions, config, mode);

    if normalization == Normalization::Peak {
        let max = intensities.iter().copied().fold(0.0_f64, f64::max);
        if max > 0.0 {
            for v in &mut intensities {
                *v /= max;
            }
        }
    }

    IntensityProfile::new(positions, intensities)
}

/// 完整模拟：屏宽 W 内 `resolution` 个点的图样
pub fn simulate(
    config: &OpticalConfiguration,
    screen_width: f64,
    resolution: usize,
    mode: SlitMode,
    normalization: Normalization,
) -> Result<IntensityProfile> {
    let positions = screen_positions(screen_width, resolution)?;
    profile_at(positions, config, mode, normalization)
}

/// 双缝实验模拟（窗口最大值归一化）
pub fn simulate_experiment(
    config: &OpticalConfiguration,
    screen_width: f64,
    resolution: usize,
) -> Result<IntensityProfile> {
    simulate(
        config,
        screen_width,
        resolution,
        SlitMode::Double,
        Normalization::Peak,
    )
}

/// 以衍射角为横坐标的图样，θ ∈ [-max_angle, max_angle]
pub fn simulate_angular(
    config: &OpticalConfiguration,
    max_angle: f64,
    resolution: usize,
    mode: SlitMode,
) -> Result<IntensityProfile> {
    if !(max_angle > 0.0 && max_angle < PI / 2.0) {
        return Err(SlitError::invalid_parameter(
            "max_angle",
            max_angle,
            "must be in (0, π/2)",
        ));
    }
    let angles = screen_positions(2.0 * max_angle, resolution)?;
    let intensities = angles
        .iter()
        .map(|&theta| match mode {
            SlitMode::Single => single_slit_at_angle(theta, config),
            SlitMode::Double => double_slit_at_angle(theta, config),
        })
        .collect();
    IntensityProfile::new(angles, intensities)
}

// ─────────────────────────────────────────────────────────────
// 推导量
// ─────────────────────────────────────────────────────────────

/// 条纹间距 Δy = λD/d
///
/// 小角近似，仅在中心轴附近准确；大角度位置请使用 [`exact_bright_fringe_positions`]。
pub fn fringe_spacing(config: &OpticalConfiguration) -> f64 {
    config.wavelength() * config.screen_distance() / config.slit_separation()
}

/// 角条纹间距 λ/d（rad）
pub fn angular_fringe_spacing(config: &OpticalConfiguration) -> f64 {
    config.wavelength() / config.slit_separation()
}

/// 亮纹位置 y_m = m·λD/d
pub fn bright_fringe_positions(config: &OpticalConfiguration, orders: RangeInclusive<i32>) -> Vec<f64> {
    let spacing = fringe_spacing(config);
    orders.map(|m| m as f64 * spacing).collect()
}

/// 暗纹位置 y_m = (m + ½)·λD/d
pub fn dark_fringe_positions(config: &OpticalConfiguration, orders: RangeInclusive<i32>) -> Vec<f64> {
    let spacing = fringe_spacing(config);
    orders.map(|m| (m as f64 + 0.5) * spacing).collect()
}

/// 精确几何亮纹位置：d·sinθ = mλ，y = D·tanθ
///
/// |mλ/d| ≥ 1 的级次不存在，直接跳过。
pub fn exact_bright_fringe_positions(
    config: &OpticalConfiguration,
    orders: RangeInclusive<i32>,
) -> Vec<(i32, f64)> {
    let ratio = angular_fringe_spacing(config);
    orders
        .filter_map(|m| angle_to_position(m as f64 * ratio, config).map(|y| (m, y)))
        .collect()
}

/// 单缝包络零点：a·sinθ = mλ（m ≠ 0）
pub fn envelope_minima(config: &OpticalConfiguration, orders: RangeInclusive<i32>) -> Vec<(i32, f64)> {
    let ratio = config.wavelength() / config.slit_width();
    orders
        .filter(|&m| m != 0)
        .filter_map(|m| angle_to_position(m as f64 * ratio, config).map(|y| (m, y)))
        .collect()
}

/// 缺级：干涉亮纹恰好落在包络零点上的级次（m·a/d 为非零整数）
pub fn missing_orders(config: &OpticalConfiguration, max_order: i32) -> Vec<i32> {
    let ratio = config.slit_width() / config.slit_separation();
    (-max_order..=max_order)
        .filter(|&m| {
            let k = m as f64 * ratio;
            let nearest = k.round();
            nearest != 0.0 && (k - nearest).abs() < 1e-9
        })
        .collect()
}

/// 窗口边缘的衍射角
pub fn max_angle(config: &OpticalConfiguration, screen_width: f64) -> f64 {
    diffraction_angle(screen_width.abs() / 2.0, config.screen_distance())
}

/// 单侧可见亮纹数 ⌊W / 2Δy⌋
pub fn expected_fringe_count(config: &OpticalConfiguration, screen_width: f64) -> usize {
    (screen_width / (2.0 * fringe_spacing(config))).floor().max(0.0) as usize
}

/// 配置警告加上观察窗口相关的警告
pub fn window_warnings(config: &OpticalConfiguration, screen_width: f64) -> Vec<ConfigWarning> {
    let mut warnings = config.warnings();
    let angle = max_angle(config, screen_width);
    if angle > SMALL_ANGLE_LIMIT {
        warnings.push(ConfigWarning::WideAngle {
            max_angle: angle,
            limit: SMALL_ANGLE_LIMIT,
        });
    }
    warnings
}

/// sinθ → 屏上坐标
fn angle_to_position(sin_theta: f64, config: &OpticalConfiguration) -> Option<f64> {
    if sin_theta.abs() >= 1.0 {
        return None;
    }
    Some(config.screen_distance() * sin_theta.asin().tan())
}
