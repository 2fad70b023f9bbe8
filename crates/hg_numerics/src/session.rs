// crates/hg_numerics/src/session.rs

//! 计算会话
//!
//! 把一次会话需要的只读状态（精度上下文、Gabcke 系数表、Gram 求解器配置）
//! 集中在一处构造。批处理驱动器与单点调用共用同一个会话。

use hg_config::{PrecisionContext, SessionConfig};
use hg_foundation::{DecimalAccuracy, HgResult};
use rug::{Float, Integer};

use crate::gabcke::GabckeTable;
use crate::gram::{gram_near_t, GramPoint, GramSolver, GramSolverConfig};
use crate::hardy_z::HardyZEvaluator;
use crate::theta::theta;

/// 临界线计算会话
#[derive(Debug, Clone)]
pub struct CriticalLineSession {
    ctx: PrecisionContext,
    table: GabckeTable,
    solver: GramSolver,
    accuracy: DecimalAccuracy,
    workers: usize,
}

impl CriticalLineSession {
    /// 按会话配置构造
    pub fn new(config: &SessionConfig) -> HgResult<Self> {
        config.validate()?;
        let ctx = config.build_context();
        let table = GabckeTable::new(&ctx)?;
        let solver = GramSolver::new(GramSolverConfig::try_from(config)?);
        log::info!(
            "会话已建立: {}, {} 个工作线程, Gram 迭代上限 {}, 默认精度 {}",
            ctx.precision(),
            config.workers,
            config.gram_max_iterations,
            config.gram_accuracy
        );
        Ok(Self {
            ctx,
            table,
            solver,
            accuracy: config.gram_accuracy,
            workers: config.workers,
        })
    }

    /// 以给定位宽和其余默认值构造
    pub fn with_bits(bits: u32) -> HgResult<Self> {
        let config = SessionConfig {
            precision: hg_config::Precision::new(bits)?,
            ..SessionConfig::default()
        };
        Self::new(&config)
    }

    /// 精度上下文
    pub fn context(&self) -> &PrecisionContext {
        &self.ctx
    }

    /// 系数表
    pub fn table(&self) -> &GabckeTable {
        &self.table
    }

    /// 批量计算的工作线程数
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Hardy Z 求值器
    pub fn evaluator(&self) -> HardyZEvaluator<'_> {
        // 表与上下文在构造时同源，位宽一定一致
        HardyZEvaluator::from_parts(&self.ctx, &self.table)
    }

    /// θ(t)
    pub fn theta(&self, t: &Float) -> Float {
        theta(&self.ctx, t)
    }

    /// Z(t)
    pub fn hardy_z(&self, t: &Float) -> HgResult<Float> {
        self.evaluator().evaluate(t)
    }

    /// 以会话默认精度求 g_n
    pub fn gram_at_n(&self, n: &Integer) -> HgResult<GramPoint> {
        self.solver.gram_at_n(&self.ctx, n, self.accuracy)
    }

    /// 以指定精度求 g_n
    pub fn gram_at_n_with(&self, n: &Integer, accuracy: DecimalAccuracy) -> HgResult<GramPoint> {
        self.solver.gram_at_n(&self.ctx, n, accuracy)
    }

    /// ⌊θ(t)/π⌋
    pub fn gram_near_t(&self, t: &Float) -> HgResult<Integer> {
        gram_near_t(&self.ctx, t)
    }
}
