//! # 实验报告辅助计算
//!
//! 将手工测得的条纹间距与理论值对照：相对误差、符合程度分级、
//! 由实测间距反推双缝间距，以及间距的误差传递。
//!
//! ## 依赖关系
//! - 被 `commands/report.rs` 调用
//! - 使用 `optics/engine.rs` 的 fringe_spacing

use crate::error::{Result, SlitError};
use crate::models::OpticalConfiguration;
use crate::optics::engine;

use std::fmt;

/// 实验与理论的符合程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agreement {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Agreement {
    /// 按相对误差（比例，非百分数）分级
    pub fn from_relative_error(error: f64) -> Self {
        let percent = error.abs() * 100.0;
        if percent < 5.0 {
            Agreement::Excellent
        } else if percent < 15.0 {
            Agreement::Good
        } else if percent < 30.0 {
            Agreement::Fair
        } else {
            Agreement::Poor
        }
    }
}

impl fmt::Display for Agreement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Agreement::Excellent => write!(f, "excellent"),
            Agreement::Good => write!(f, "good"),
            Agreement::Fair => write!(f, "fair"),
            Agreement::Poor => write!(f, "poor"),
        }
    }
}

/// 测量不确定度（m）
#[derive(Debug, Clone, Copy)]
pub struct Uncertainties {
    pub screen_distance: f64,
    pub slit_separation: f64,
}

/// 单次测量的评估结果
#[derive(Debug, Clone)]
pub struct LabAssessment {
    pub predicted_spacing: f64,
    pub measured_spacing: f64,
    /// (测量 - 理论) / 理论
    pub relative_error: f64,
    pub agreement: Agreement,
    pub estimated_separation: f64,
    pub spacing_uncertainty: Option<f64>,
}

/// 相对误差 (measured - expected) / expected
pub fn relative_error(measured: f64, expected: f64) -> Result<f64> {
    if !expected.is_finite() || expected == 0.0 {
        return Err(SlitError::invalid_parameter(
            "expected",
            expected,
            "must be finite and non-zero",
        ));
    }
    Ok((measured - expected) / expected)
}

/// 由实测条纹间距反推双缝间距 d = λD/Δy
pub fn estimate_slit_separation(config: &OpticalConfiguration, measured_spacing: f64) -> Result<f64> {
    if !measured_spacing.is_finite() || measured_spacing <= 0.0 {
        return Err(SlitError::invalid_parameter(
            "measured_spacing",
            measured_spacing,
            "must be finite and > 0",
        ));
    }
    Ok(config.wavelength() * config.screen_distance() / measured_spacing)
}

/// 条纹间距的误差传递 Δy·√((δD/D)² + (δd/d)²)
///
/// 波长视为精确值。
pub fn propagated_spacing_uncertainty(config: &OpticalConfiguration, uncertainties: &Uncertainties) -> Result<f64> {
    for (name, value) in [
        ("screen_distance_uncertainty", uncertainties.screen_distance),
        ("slit_separation_uncertainty", uncertainties.slit_separation),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(SlitError::invalid_parameter(name, value, "must be finite and >= 0"));
        }
    }

    let rel_d = uncertainties.screen_distance / config.screen_distance();
    let rel_sep = uncertainties.slit_separation / config.slit_separation();
    Ok(engine::fringe_spacing(config) * (rel_d * rel_d + rel_sep * rel_sep).sqrt())
}

/// 完整评估一次测量
pub fn assess(
    config: &OpticalConfiguration,
    measured_spacing: f64,
    uncertainties: Option<&Uncertainties>,
) -> Result<LabAssessment> {
    let predicted_spacing = engine::fringe_spacing(config);
    let estimated_separation = estimate_slit_separation(config, measured_spacing)?;
    let relative_error = relative_error(measured_spacing, predicted_spacing)?;

    let spacing_uncertainty = uncertainties
        .map(|u| propagated_spacing_uncertainty(config, u))
        .transpose()?;

    Ok(LabAssessment {
        predicted_spacing,
        measured_spacing,
        relative_error,
        agreement: Agreement::from_relative_error(relative_error),
        estimated_separation,
        spacing_uncertainty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab_config() -> OpticalConfiguration {
        OpticalConfiguration::new(650e-9, 50e-6, 200e-6, 1.5).unwrap()
    }

    #[test]
    fn test_agreement_grades() {
        assert_eq!(Agreement::from_relative_error(0.0), Agreement::Excellent);
        assert_eq!(Agreement::from_relative_error(-0.049), Agreement::Excellent);
        assert_eq!(Agreement::from_relative_error(0.10), Agreement::Good);
        assert_eq!(Agreement::from_relative_error(-0.20), Agreement::Fair);
        assert_eq!(Agreement::from_relative_error(0.30), Agreement::Poor);
        assert_eq!(Agreement::Good.to_string(), "good");
    }

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.1, 1.0).unwrap() - 0.1).abs() < 1e-12);
        assert!((relative_error(0.9, 1.0).unwrap() + 0.1).abs() < 1e-12);
        assert!(relative_error(1.0, 0.0).is_err());
    }

    #[test]
    fn test_assess_measurement() {
        let config = lab_config();
        let result = assess(&config, 4.9e-3, None).unwrap();

        assert!((result.predicted_spacing - 4.875e-3).abs() < 1e-12);
        assert!((result.relative_error - 0.025 / 4.875).abs() < 1e-9);
        assert_eq!(result.agreement, Agreement::Excellent);
        assert!((result.estimated_separation - 198.979_6e-6).abs() < 1e-9);
        assert!(result.spacing_uncertainty.is_none());
    }

    #[test]
    fn test_uncertainty_propagation() {
        let config = lab_config();
        let uncertainties = Uncertainties {
            screen_distance: 0.01,
            slit_separation: 50e-6,
        };

        let sigma = propagated_spacing_uncertainty(&config, &uncertainties).unwrap();
        assert!((sigma - 1.2192e-3).abs() < 1e-6, "sigma = {}", sigma);

        let zero = Uncertainties {
            screen_distance: 0.0,
            slit_separation: 0.0,
        };
        assert_eq!(propagated_spacing_uncertainty(&config, &zero).unwrap(), 0.0);

        let negative = Uncertainties {
            screen_distance: -0.01,
            slit_separation: 0.0,
        };
        assert!(propagated_spacing_uncertainty(&config, &negative).is_err());
    }

    #[test]
    fn test_estimate_rejects_non_positive_spacing() {
        let config = lab_config();
        assert!(estimate_slit_separation(&config, 0.0).is_err());
        assert!(assess(&config, -1e-3, None).is_err());
    }
}
