// crates/hg_workflow/src/lib.rs

//! HardyGram 批处理模块
//!
//! 在有界线程池上并行计算等差数列上的 Hardy Z，并按序号顺序交付。
//!
//! # 模块结构
//!
//! - [`job`]: 批量任务与样本
//! - [`driver`]: 批量驱动器与惰性样本流
//! - [`error`]: 批处理错误
//!
//! # 示例
//!
//! ```rust,no_run
//! use hg_config::SessionConfig;
//! use hg_numerics::CriticalLineSession;
//! use hg_workflow::{BatchHardyZDriver, BatchJob};
//!
//! let config = SessionConfig { workers: 4, ..SessionConfig::default() };
//! let session = CriticalLineSession::new(&config)?;
//! let driver = BatchHardyZDriver::from_session(&session)?;
//! let job = BatchJob::parse(session.context(), "100", "1", 5, 42)?;
//!
//! driver.run(&job, |sample, index, caller| {
//!     println!("[{}] #{} Z({}) = {}", caller, index, sample.t, sample.z);
//! })?;
//! # Ok::<(), hg_workflow::WorkflowError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod error;
pub mod job;

// 重导出核心类型
pub use driver::{BatchHardyZDriver, HardyZStream};
pub use error::WorkflowError;
pub use job::{BatchJob, HardyZSample};
