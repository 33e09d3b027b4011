//! # 工具函数模块
//!
//! 提供美化输出、进度条和长度单位解析。
//!
//! ## 依赖关系
//! - 被 `cli/` 和 `commands/` 模块使用
//! - 子模块: output, progress, units

pub mod output;
pub mod progress;
pub mod units;
