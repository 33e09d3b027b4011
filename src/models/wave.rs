//! # 单色平面波
//!
//! 由波长派生的频率、波数与相位。
//!
//! ## 依赖关系
//! - 被 `models/configuration.rs` 使用
//! - 被 `commands/simulate.rs` 用于打印光源信息

use std::f64::consts::PI;

/// 真空光速（m/s）
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// 单色波
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    /// 波长（m）
    pub wavelength: f64,
    /// 振幅
    pub amplitude: f64,
}

impl Wave {
    pub fn new(wavelength: f64) -> Self {
        Self {
            wavelength,
            amplitude: 1.0,
        }
    }

    /// 频率 c/λ（Hz）
    pub fn frequency(&self) -> f64 {
        SPEED_OF_LIGHT / self.wavelength
    }

    /// 波数 k = 2π/λ（rad/m）
    pub fn wave_number(&self) -> f64 {
        2.0 * PI / self.wavelength
    }

    /// 传播距离 r 后的相位 k·r
    pub fn phase_at(&self, distance: f64) -> f64 {
        self.wave_number() * distance
    }

    /// 复振幅 A·e^{ikr}，返回 (实部, 虚部)
    pub fn amplitude_at(&self, distance: f64) -> (f64, f64) {
        let phase = self.phase_at(distance);
        (self.amplitude * phase.cos(), self.amplitude * phase.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_quantities() {
        let wave = Wave::new(650e-9);
        assert!((wave.frequency() - SPEED_OF_LIGHT / 650e-9).abs() < 1.0);
        assert!((wave.wave_number() - 2.0 * PI / 650e-9).abs() < 1e-6);
        assert_eq!(wave.phase_at(0.0), 0.0);
        assert!((wave.phase_at(650e-9) - 2.0 * PI).abs() < 1e-10);
    }

    #[test]
    fn test_complex_amplitude() {
        let wave = Wave {
            amplitude: 2.0,
            ..Wave::new(500e-9)
        };

        let (re, im) = wave.amplitude_at(0.0);
        assert!((re - 2.0).abs() < 1e-10);
        assert!(im.abs() < 1e-10);

        // 四分之一波长处相位为 π/2
        let (re, im) = wave.amplitude_at(125e-9);
        assert!(re.abs() < 1e-10);
        assert!((im.abs() - 2.0).abs() < 1e-10);
    }
}
