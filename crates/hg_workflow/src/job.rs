// crates/hg_workflow/src/job.rs

//! 批量任务定义
//!
//! 一个批量任务是等差数列 t_i = t0 + i·increment (i = 0..count) 上的
//! Hardy Z 采样，附带调用方给定的标识，原样回传给回调。

use hg_config::limits::{check_count, check_hardy_t, check_increment};
use hg_config::PrecisionContext;
use hg_foundation::HgResult;
use rug::Float;

/// 批量任务
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// 起点
    pub t0: Float,
    /// 步长
    pub increment: Float,
    /// 样本个数
    pub count: usize,
    /// 调用方标识
    pub caller_id: u32,
}

impl BatchJob {
    /// 创建任务（不做验证）
    pub fn new(t0: Float, increment: Float, count: usize, caller_id: u32) -> Self {
        Self {
            t0,
            increment,
            count,
            caller_id,
        }
    }

    /// 由十进制文本创建任务，按上下文位宽解析
    pub fn parse(
        ctx: &PrecisionContext,
        t0: &str,
        increment: &str,
        count: usize,
        caller_id: u32,
    ) -> HgResult<Self> {
        Ok(Self::new(
            ctx.parse_float(t0)?,
            ctx.parse_float(increment)?,
            count,
            caller_id,
        ))
    }

    /// 检查起点、步长、个数以及最后一个 t 是否在定义域内
    pub fn validate(&self) -> HgResult<()> {
        check_count(self.count)?;
        check_hardy_t(self.t0.to_f64())?;
        check_increment(self.increment.to_f64())?;
        if self.count > 1 {
            let last = self.t_at(self.count - 1, self.t0.prec().max(self.increment.prec()));
            check_hardy_t(last.to_f64())?;
        }
        Ok(())
    }

    /// 第 index 个采样点 t0 + index·increment
    pub fn t_at(&self, index: usize, bits: u32) -> Float {
        let offset = Float::with_val(bits, &self.increment * index as u64);
        Float::with_val(bits, &self.t0 + &offset)
    }
}

/// 一个 Hardy Z 样本
#[derive(Debug, Clone, PartialEq)]
pub struct HardyZSample {
    /// 全局序号
    pub index: usize,
    /// 采样点
    pub t: Float,
    /// Z(t)
    pub z: Float,
}
