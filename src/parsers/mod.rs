//! # 解析器模块
//!
//! 读取实测强度数据文件。图像解码不在此处，输入已是数值序列。
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs` 使用
//! - 子模块: trace

pub mod trace;

pub use trace::parse_trace_file;
