//! # 实验图样分析模块
//!
//! 归一化实测强度、检测峰谷、估计条纹间距与可见度，并与理论图样比较。
//! 只接受数值序列，不涉及图像解码与文件读写。
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs`, `commands/report.rs` 使用
//! - 使用 `models/` 的 IntensityProfile 与 ComparisonResult
//! - 子模块: signal, compare, interpolate, lab

pub mod compare;
pub mod interpolate;
pub mod lab;
pub mod signal;

pub use compare::compare_with_theory;
pub use signal::AnalyzerSettings;
