//! # 强度分布数据模型
//!
//! 屏幕坐标（m）或衍射角（rad）与对应强度组成的有序序列。
//!
//! 不变量：非空、两序列等长、坐标严格递增、所有值有限、强度非负。
//! 违反任一条件的构造都会返回 `MalformedProfile`。
//!
//! ## 依赖关系
//! - 由 `optics/engine.rs` 生成
//! - 被 `analysis/`, `optics/plot.rs`, `optics/export.rs` 使用

use crate::error::{Result, SlitError};

use serde::Serialize;

/// 强度分布
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityProfile {
    positions: Vec<f64>,
    intensities: Vec<f64>,
}

impl IntensityProfile {
    /// 创建并校验强度分布
    pub fn new(positions: Vec<f64>, intensities: Vec<f64>) -> Result<Self> {
        if positions.is_empty() {
            return Err(SlitError::MalformedProfile("empty sequence".to_string()));
        }
        if positions.len() != intensities.len() {
            return Err(SlitError::MalformedProfile(format!(
                "length mismatch: {} positions vs {} intensities",
                positions.len(),
                intensities.len()
            )));
        }
        if let Some(i) = positions.iter().position(|x| !x.is_finite()) {
            return Err(SlitError::MalformedProfile(format!(
                "non-finite position at index {}",
                i
            )));
        }
        if let Some(i) = positions.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SlitError::MalformedProfile(format!(
                "positions not strictly increasing at index {}",
                i + 1
            )));
        }
        if let Some(i) = intensities.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(SlitError::MalformedProfile(format!(
                "intensity at index {} is {} (must be finite and >= 0)",
                i, intensities[i]
            )));
        }

        Ok(Self {
            positions,
            intensities,
        })
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn intensities(&self) -> &[f64] {
        &self.intensities
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// 坐标范围 (min, max)
    pub fn domain(&self) -> (f64, f64) {
        (self.positions[0], self.positions[self.positions.len() - 1])
    }

    /// 平均采样间隔；单点分布返回 None
    pub fn sample_spacing(&self) -> Option<f64> {
        if self.len() < 2 {
            return None;
        }
        let (min, max) = self.domain();
        Some((max - min) / (self.len() - 1) as f64)
    }

    /// 最大强度
    pub fn peak_intensity(&self) -> f64 {
        self.intensities.iter().copied().fold(0.0_f64, f64::max)
    }

    /// (坐标, 强度) 迭代器
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.intensities.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.positions, self.intensities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile() {
        let profile = IntensityProfile::new(vec![-1.0, 0.0, 1.0], vec![0.2, 1.0, 0.2]).unwrap();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.domain(), (-1.0, 1.0));
        assert_eq!(profile.sample_spacing(), Some(1.0));
        assert_eq!(profile.peak_intensity(), 1.0);
        assert_eq!(profile.points().nth(1), Some((0.0, 1.0)));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(IntensityProfile::new(vec![], vec![]).is_err());
        assert!(IntensityProfile::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(IntensityProfile::new(vec![0.0, 0.0], vec![1.0, 1.0]).is_err());
        assert!(IntensityProfile::new(vec![1.0, 0.0], vec![1.0, 1.0]).is_err());
        assert!(IntensityProfile::new(vec![0.0, 1.0], vec![1.0, -0.1]).is_err());
        assert!(IntensityProfile::new(vec![0.0, 1.0], vec![f64::NAN, 0.1]).is_err());
    }
}
