//! # 统一错误处理模块
//!
//! 定义 doubleslit 的所有错误类型，使用 `thiserror` 派生。
//!
//! 核心计算（`optics/`, `analysis/`）只会返回前五类错误；
//! 其余变体属于文件读写、命令行解析等外围层。
//! 数值奇点（β = 0 等）在引擎内部按解析极限处理，不会作为错误出现。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// doubleslit 统一错误类型
#[derive(Error, Debug)]
pub enum SlitError {
    // ─────────────────────────────────────────────────────────────
    // 物理/数值错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid parameter '{name}' = {value:e}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: String,
    },

    #[error("Degenerate signal: {0}")]
    DegenerateSignal(String),

    #[error("Insufficient peaks: found {found}, need at least {required}")]
    InsufficientPeaks { found: usize, required: usize },

    #[error("Incompatible domains: [{a_min:e}, {a_max:e}] and [{b_min:e}, {b_max:e}] {reason}")]
    IncompatibleDomains {
        a_min: f64,
        a_max: f64,
        b_min: f64,
        b_max: f64,
        reason: String,
    },

    #[error("Malformed intensity profile: {0}")]
    MalformedProfile(String),

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // CSV / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl SlitError {
    /// 构造 InvalidParameter 错误
    pub fn invalid_parameter(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        SlitError::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SlitError>;
