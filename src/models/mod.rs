//! # 数据模型模块
//!
//! 定义光学配置、强度分布与比较结果等值类型。
//!
//! ## 依赖关系
//! - 被 `optics/`, `analysis/` 和 `commands/` 使用
//! - 子模块: configuration, profile, comparison, wave

pub mod comparison;
pub mod configuration;
pub mod profile;
pub mod wave;

pub use comparison::ComparisonResult;
pub use configuration::{ConfigWarning, OpticalConfiguration, Parameter};
pub use profile::IntensityProfile;
pub use wave::Wave;
