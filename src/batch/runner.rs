//! # 批量执行器
//!
//! 在独立的 rayon 线程池中并行执行批量任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果顺序与输入一致
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/compare.rs`, `commands/sweep.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, SlitError};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<T> {
    Success(T),
    /// (文件路径, 错误信息)
    Failed(String, String),
}

/// 批量处理结果统计
#[derive(Debug)]
pub struct BatchResult<T> {
    pub successes: Vec<T>,
    pub failures: Vec<(String, String)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult<T>) {
        match result {
            ProcessResult::Success(value) => self.successes.push(value),
            ProcessResult::Failed(path, err) => self.failures.push((path, err)),
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }
}

/// 批量执行器
pub struct BatchRunner {
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，jobs 为 0 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    fn pool(&self) -> Result<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| SlitError::Other(format!("failed to build thread pool: {}", e)))
    }

    /// 在线程池中执行任意并行计算
    pub fn install<OP, R>(&self, op: OP) -> Result<R>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        Ok(self.pool()?.install(op))
    }

    /// 并行处理文件列表
    pub fn run<T, F>(&self, files: &[PathBuf], message: &str, processor: F) -> Result<BatchResult<T>>
    where
        T: Send,
        F: Fn(&Path) -> ProcessResult<T> + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, message);

        let results: Vec<ProcessResult<T>> = self.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file.as_path());
                    pb.inc(1);
                    result
                })
                .collect()
        })?;

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}
