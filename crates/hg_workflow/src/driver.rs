// crates/hg_workflow/src/driver.rs

//! 批量 Hardy Z 驱动器
//!
//! 把任务切成大小不超过 W 的连续批次，每个样本作为一个线程池任务，
//! 编排线程在批次边界等待全部任务完成后，按全局序号升序交付结果。
//!
//! ```text
//! batch 0: [0, W)      ── scope ──> 回调 0, 1, …, W-1
//! batch 1: [W, 2W)     ── scope ──> 回调 W, …
//! …
//! ```
//!
//! 交付顺序与 W 无关，W 只影响耗时。W = 1 时不建线程池，直接在当前线程计算。

use std::collections::VecDeque;
use std::time::Instant;

use hg_config::limits::check_workers;
use hg_foundation::HgResult;
use hg_numerics::{CriticalLineSession, HardyZEvaluator};
use rayon::{ThreadPool, ThreadPoolBuilder};
use rug::Float;

use crate::error::WorkflowError;
use crate::job::{BatchJob, HardyZSample};

/// 批量驱动器
pub struct BatchHardyZDriver<'a> {
    evaluator: HardyZEvaluator<'a>,
    workers: usize,
    pool: Option<ThreadPool>,
}

impl<'a> BatchHardyZDriver<'a> {
    /// 创建驱动器，`workers` 必须在 [1, 8] 内
    pub fn new(evaluator: HardyZEvaluator<'a>, workers: usize) -> Result<Self, WorkflowError> {
        check_workers(workers)?;

        let pool = if workers > 1 {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("hardy-z-{}", i))
                    .build()?,
            )
        } else {
            None
        };

        tracing::debug!("批量驱动器已创建: {} 个工作线程", workers);
        Ok(Self {
            evaluator,
            workers,
            pool,
        })
    }

    /// 使用会话的求值器与会话配置的线程数创建驱动器
    pub fn from_session(session: &'a CriticalLineSession) -> Result<Self, WorkflowError> {
        Self::new(session.evaluator(), session.workers())
    }

    /// 工作线程数
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 执行任务，按序号升序回调 `callback(sample, index, caller_id)`
    ///
    /// 返回交付的样本数，正常结束时等于 `job.count`。
    pub fn run<F>(&self, job: &BatchJob, mut callback: F) -> Result<usize, WorkflowError>
    where
        F: FnMut(HardyZSample, usize, u32),
    {
        job.validate().map_err(WorkflowError::InvalidJob)?;
        let started = Instant::now();
        tracing::info!(
            "批量任务开始: caller={}, count={}, workers={}",
            job.caller_id,
            job.count,
            self.workers
        );

        let mut delivered = 0;
        while delivered < job.count {
            let batch = self.compute_batch(job, delivered)?;
            for sample in batch {
                let index = sample.index;
                callback(sample, index, job.caller_id);
                delivered += 1;
            }
        }

        tracing::info!(
            "批量任务完成: caller={}, {} 个样本, 耗时 {:.3}s",
            job.caller_id,
            delivered,
            started.elapsed().as_secs_f64()
        );
        Ok(delivered)
    }

    /// 以惰性迭代器形式交付同样的有序结果
    ///
    /// 每次缓冲区耗尽时计算下一批。
    pub fn stream<'d, 'j>(
        &'d self,
        job: &'j BatchJob,
    ) -> Result<HardyZStream<'d, 'a, 'j>, WorkflowError> {
        job.validate().map_err(WorkflowError::InvalidJob)?;
        Ok(HardyZStream {
            driver: self,
            job,
            next_index: 0,
            buffer: VecDeque::with_capacity(self.workers),
        })
    }

    /// 计算从 `start` 开始的一批，长度为 min(W, 剩余)
    fn compute_batch(&self, job: &BatchJob, start: usize) -> Result<Vec<HardyZSample>, WorkflowError> {
        let len = self.workers.min(job.count - start);
        let bits = self.evaluator.context().bits();
        let ts: Vec<Float> = (start..start + len).map(|i| job.t_at(i, bits)).collect();
        let mut slots: Vec<Option<HgResult<Float>>> = (0..len).map(|_| None).collect();

        tracing::debug!("批次 [{}, {}) 开始", start, start + len);

        match &self.pool {
            Some(pool) => {
                let evaluator = self.evaluator;
                pool.scope(|scope| {
                    for (slot, t) in slots.iter_mut().zip(&ts) {
                        scope.spawn(move |_| {
                            *slot = Some(evaluator.evaluate(t));
                        });
                    }
                });
            }
            None => {
                for (slot, t) in slots.iter_mut().zip(&ts) {
                    *slot = Some(self.evaluator.evaluate(t));
                }
            }
        }

        ts.into_iter()
            .zip(slots)
            .enumerate()
            .map(|(offset, (t, slot))| {
                let index = start + offset;
                match slot {
                    Some(Ok(z)) => Ok(HardyZSample { index, t, z }),
                    Some(Err(e)) => Err(WorkflowError::sample(index, e)),
                    None => Err(WorkflowError::MissingResult(index)),
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for BatchHardyZDriver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchHardyZDriver")
            .field("workers", &self.workers)
            .field("pooled", &self.pool.is_some())
            .finish()
    }
}

/// 有序的惰性样本流
///
/// 有限且可重启：[`HardyZStream::restart`] 之后从序号 0 重新计算，
/// 产出与上一轮逐位一致。出现错误后流结束。
pub struct HardyZStream<'d, 'a, 'j> {
    driver: &'d BatchHardyZDriver<'a>,
    job: &'j BatchJob,
    next_index: usize,
    buffer: VecDeque<HardyZSample>,
}

impl HardyZStream<'_, '_, '_> {
    /// 回到序号 0
    pub fn restart(&mut self) {
        self.next_index = 0;
        self.buffer.clear();
    }

    /// 已计算（含缓冲中）的样本数
    pub fn computed(&self) -> usize {
        self.next_index
    }
}

impl Iterator for HardyZStream<'_, '_, '_> {
    type Item = Result<HardyZSample, WorkflowError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(sample) = self.buffer.pop_front() {
            return Some(Ok(sample));
        }
        if self.next_index >= self.job.count {
            return None;
        }

        match self.driver.compute_batch(self.job, self.next_index) {
            Ok(batch) => {
                self.next_index += batch.len();
                self.buffer.extend(batch);
                self.buffer.pop_front().map(Ok)
            }
            Err(e) => {
                self.next_index = self.job.count;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len() + (self.job.count - self.next_index);
        (0, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_config::SessionConfig;

    fn session(workers: usize) -> CriticalLineSession {
        let config = SessionConfig {
            precision: hg_config::Precision::new(128).unwrap(),
            workers,
            ..SessionConfig::default()
        };
        CriticalLineSession::new(&config).unwrap()
    }

    #[test]
    fn test_worker_bounds() {
        let session = session(1);
        assert!(BatchHardyZDriver::new(session.evaluator(), 0).is_err());
        assert!(BatchHardyZDriver::new(session.evaluator(), 9).is_err());
        let driver = BatchHardyZDriver::new(session.evaluator(), 8).unwrap();
        assert_eq!(driver.workers(), 8);
    }

    #[test]
    fn test_workers_follow_session_config() {
        let config: SessionConfig = serde_json::from_str(r#"{ "workers": 4 }"#).unwrap();
        let session = CriticalLineSession::new(&config).unwrap();
        let driver = BatchHardyZDriver::from_session(&session).unwrap();
        assert_eq!(driver.workers(), 4);
        assert!(driver.pool.is_some());

        let job = BatchJob::parse(session.context(), "100", "1", 9, 0).unwrap();
        assert_eq!(driver.compute_batch(&job, 0).unwrap().len(), 4);
    }

    #[test]
    fn test_single_worker_has_no_pool() {
        let session = session(1);
        let driver = BatchHardyZDriver::from_session(&session).unwrap();
        assert_eq!(driver.workers(), 1);
        assert!(driver.pool.is_none());
    }

    #[test]
    fn test_batch_is_sized_to_remaining() {
        let session = session(4);
        let driver = BatchHardyZDriver::from_session(&session).unwrap();
        let job = BatchJob::parse(session.context(), "100", "1", 6, 0).unwrap();
        assert_eq!(driver.compute_batch(&job, 0).unwrap().len(), 4);
        let tail = driver.compute_batch(&job, 4).unwrap();
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].index, 4);
        assert_eq!(tail[1].t, 105);
    }

    #[test]
    fn test_invalid_job_dispatches_nothing() {
        let session = session(2);
        let driver = BatchHardyZDriver::from_session(&session).unwrap();
        let job = BatchJob::parse(session.context(), "100", "1", 0, 0).unwrap();
        let mut calls = 0;
        let err = driver.run(&job, |_, _, _| calls += 1).unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidJob(_)));
        assert_eq!(calls, 0);
        assert!(matches!(driver.stream(&job), Err(WorkflowError::InvalidJob(_))));
    }
}
