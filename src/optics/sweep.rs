//! # 参数扫描
//!
//! 固定其余参数，对单个参数取一组值分别计算图样。
//! 各配置互相独立，使用 rayon 并行计算，结果顺序与输入值一致。
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs` 调用
//! - 使用 `optics/engine.rs` 计算图样

use crate::error::{Result, SlitError};
use crate::models::{IntensityProfile, OpticalConfiguration, Parameter};
use crate::optics::engine::{self, Normalization, SlitMode};

use rayon::prelude::*;

/// 扫描中的单个点
#[derive(Debug, Clone)]
pub struct SweepPoint {
    /// 扫描参数取值
    pub value: f64,
    pub configuration: OpticalConfiguration,
    pub profile: IntensityProfile,
    /// 小角近似条纹间距
    pub fringe_spacing: f64,
}

/// 扫描设置
#[derive(Debug, Clone, Copy)]
pub struct SweepSettings {
    pub screen_width: f64,
    pub resolution: usize,
    pub mode: SlitMode,
}

/// 执行参数扫描
///
/// 任一取值非法时整体失败，返回其中一个 InvalidParameter。
pub fn run_sweep(
    base: &OpticalConfiguration,
    parameter: Parameter,
    values: &[f64],
    settings: SweepSettings,
) -> Result<Vec<SweepPoint>> {
    if values.is_empty() {
        return Err(SlitError::InvalidArgument(format!(
            "no values given for {} sweep",
            parameter
        )));
    }

    values
        .par_iter()
        .map(|&value| {
            let configuration = base.with_parameter(parameter, value)?;
            let profile = engine::simulate(
                &configuration,
                settings.screen_width,
                settings.resolution,
                settings.mode,
                Normalization::Peak,
            )?;
            Ok(SweepPoint {
                value,
                configuration,
                profile,
                fringe_spacing: engine::fringe_spacing(&configuration),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SweepSettings {
        SweepSettings {
            screen_width: 0.01,
            resolution: 401,
            mode: SlitMode::Double,
        }
    }

    #[test]
    fn test_wavelength_sweep_preserves_order() {
        let base = OpticalConfiguration::default();
        let values = [450e-9, 550e-9, 650e-9];
        let points = run_sweep(&base, Parameter::Wavelength, &values, settings()).unwrap();

        assert_eq!(points.len(), 3);
        for (point, value) in points.iter().zip(values) {
            assert_eq!(point.value, value);
            assert_eq!(point.configuration.wavelength(), value);
            assert_eq!(point.profile.len(), 401);
        }
        // 波长越长条纹越宽
        assert!(points[0].fringe_spacing < points[1].fringe_spacing);
        assert!(points[1].fringe_spacing < points[2].fringe_spacing);
    }

    #[test]
    fn test_sweep_rejects_invalid_value() {
        let base = OpticalConfiguration::default();
        let result = run_sweep(
            &base,
            Parameter::ScreenDistance,
            &[0.5, -1.0, 2.0],
            settings(),
        );
        assert!(matches!(result, Err(SlitError::InvalidParameter { .. })));

        assert!(run_sweep(&base, Parameter::SlitWidth, &[], settings()).is_err());
    }
}
