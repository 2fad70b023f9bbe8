// crates/hg_workflow/src/error.rs

//! 批处理错误类型

use hg_foundation::HgError;
use thiserror::Error;

/// 批处理错误
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// 数值层错误（定义域、精度配置等）
    #[error("数值错误: {0}")]
    Numerics(#[from] HgError),

    /// 线程池构建失败
    #[error("线程池构建失败: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// 批量任务超出定义域，未派发任何计算
    #[error("批量任务无效: {0}")]
    InvalidJob(#[source] HgError),

    /// 单个样本计算失败
    #[error("第 {index} 个样本计算失败: {source}")]
    Sample {
        /// 全局序号
        index: usize,
        /// 底层错误
        #[source]
        source: HgError,
    },

    /// 工作线程未写回结果
    #[error("第 {0} 个样本没有结果")]
    MissingResult(usize),
}

impl WorkflowError {
    /// 由数值错误构造样本错误
    pub fn sample(index: usize, source: HgError) -> Self {
        Self::Sample { index, source }
    }
}
