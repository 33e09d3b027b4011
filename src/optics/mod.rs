//! # 衍射计算模块
//!
//! 提供 Fraunhofer 单缝/双缝图样计算、参数扫描、图表与数据导出。
//!
//! ## 子模块
//! - `engine`: 强度公式与推导量（条纹间距、亮纹/暗纹位置）
//! - `sweep`: 单参数并行扫描
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `analysis/` 使用
//! - 使用 `models/` 的 OpticalConfiguration 与 IntensityProfile

pub mod engine;
pub mod export;
pub mod plot;
pub mod sweep;

pub use plot::ChartOptions;
