//! # 光学配置数据模型
//!
//! 描述一次单缝/双缝实验的几何与光源参数。
//!
//! 所有长度单位均为米。配置一经构造即不可变，参数扫描时通过
//! [`OpticalConfiguration::with_parameter`] 生成新的值。
//!
//! ## 依赖关系
//! - 被 `optics/`, `analysis/lab.rs`, `commands/` 使用
//! - 使用 `models/wave.rs`

use crate::error::{Result, SlitError};
use crate::models::Wave;

use serde::Serialize;

/// 可扫描的光学参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Parameter {
    Wavelength,
    SlitWidth,
    SlitSeparation,
    ScreenDistance,
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parameter::Wavelength => write!(f, "wavelength"),
            Parameter::SlitWidth => write!(f, "slit width"),
            Parameter::SlitSeparation => write!(f, "slit separation"),
            Parameter::ScreenDistance => write!(f, "screen distance"),
        }
    }
}

/// 非致命的配置警告
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigWarning {
    /// 缝间距不大于缝宽（`slit_separation <= slit_width`），两缝在物理上重叠
    OverlappingSlits { separation: f64, width: f64 },
    /// 观察窗口边缘的衍射角超过小角近似阈值（弧度）
    WideAngle { max_angle: f64, limit: f64 },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::OverlappingSlits { separation, width } => write!(
                f,
                "slit separation ({:.1} μm) <= slit width ({:.1} μm): slits overlap, pattern is not physical",
                separation * 1e6,
                width * 1e6
            ),
            ConfigWarning::WideAngle { max_angle, limit } => write!(
                f,
                "max diffraction angle {:.3} rad exceeds {:.2} rad: λD/d fringe spacing is only approximate",
                max_angle, limit
            ),
        }
    }
}

/// 光学配置（不可变值）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OpticalConfiguration {
    /// 波长 λ（m）
    wavelength: f64,
    /// 单缝宽度 a（m）
    slit_width: f64,
    /// 缝中心间距 d（m）
    slit_separation: f64,
    /// 缝到屏距离 D（m）
    screen_distance: f64,
}

impl OpticalConfiguration {
    /// 创建并校验配置，任一参数非正即返回 InvalidParameter
    pub fn new(
        wavelength: f64,
        slit_width: f64,
        slit_separation: f64,
        screen_distance: f64,
    ) -> Result<Self> {
        Ok(Self {
            wavelength: check_positive("wavelength", wavelength)?,
            slit_width: check_positive("slit_width", slit_width)?,
            slit_separation: check_positive("slit_separation", slit_separation)?,
            screen_distance: check_positive("screen_distance", screen_distance)?,
        })
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub fn slit_width(&self) -> f64 {
        self.slit_width
    }

    pub fn slit_separation(&self) -> f64 {
        self.slit_separation
    }

    pub fn screen_distance(&self) -> f64 {
        self.screen_distance
    }

    /// 读取指定参数
    pub fn parameter(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Wavelength => self.wavelength,
            Parameter::SlitWidth => self.slit_width,
            Parameter::SlitSeparation => self.slit_separation,
            Parameter::ScreenDistance => self.screen_distance,
        }
    }

    /// 替换单个参数，返回新的已校验配置
    pub fn with_parameter(&self, parameter: Parameter, value: f64) -> Result<Self> {
        let mut next = *self;
        match parameter {
            Parameter::Wavelength => next.wavelength = check_positive("wavelength", value)?,
            Parameter::SlitWidth => next.slit_width = check_positive("slit_width", value)?,
            Parameter::SlitSeparation => {
                next.slit_separation = check_positive("slit_separation", value)?
            }
            Parameter::ScreenDistance => {
                next.screen_distance = check_positive("screen_distance", value)?
            }
        }
        Ok(next)
    }

    /// 几何合理性检查（不阻止计算）
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if self.slit_separation <= self.slit_width {
            warnings.push(ConfigWarning::OverlappingSlits {
                separation: self.slit_separation,
                width: self.slit_width,
            });
        }
        warnings
    }

    /// 对应的单色波
    pub fn wave(&self) -> Wave {
        Wave::new(self.wavelength)
    }
}

impl Default for OpticalConfiguration {
    /// 650 nm 红光激光笔、50 μm 缝宽、200 μm 缝距、1 m 屏距
    fn default() -> Self {
        Self {
            wavelength: 650e-9,
            slit_width: 50e-6,
            slit_separation: 200e-6,
            screen_distance: 1.0,
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(SlitError::invalid_parameter(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(SlitError::invalid_parameter(name, value, "must be > 0"));
    }
    Ok(value)
}
