// crates/hg_numerics/src/gram.rs

//! Gram 点求解与反查
//!
//! Gram 点 g_n 满足 θ(g_n) = nπ。
//!
//! - n ∈ {−1, 0, 1, 2}：直接查表，忽略精度要求
//! - n ≥ 3：在先验区间 [lower, upper] 内二分，直到 |θ(mid) − nπ| < 10^(−A)
//!
//! 迭代上限用尽时返回最后的中点和未收敛诊断，不视为失败。
//! 需要严格结果的调用方使用 [`GramPoint::into_converged`]。

use hg_config::limits::GRAM_LOOP_MAX;
use hg_config::{PrecisionContext, SessionConfig};
use hg_foundation::{require, DecimalAccuracy, HgError, HgResult};
use rug::ops::Pow;
use rug::{Float, Integer};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::theta::theta;

/// g_{−1}, g_0, g_1, g_2
const GRAM_SMALL: [&str; 4] = [
    "3.4360829361",
    "17.8455995404108608168263384125190970356932874",
    "23.1702827012463092789966435383015320517470983",
    "27.6701822178483449617890",
];

/// 可查表的最大序号
const GRAM_TABULATED_MAX: i32 = 2;

/// 求解状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GramStatus {
    /// 查表得到
    Tabulated,
    /// 二分收敛
    Converged {
        /// 使用的迭代次数
        iterations: usize,
    },
    /// 迭代上限用尽
    NotConverged {
        /// 已执行的迭代次数
        iterations: usize,
        /// 最后一次的 θ(mid) − nπ
        delta: f64,
    },
}

/// 一个 Gram 点
#[derive(Debug, Clone)]
pub struct GramPoint {
    /// 序号 n
    pub index: Integer,
    /// g_n
    pub value: Float,
    /// 求解状态
    pub status: GramStatus,
}

impl GramPoint {
    /// 是否满足精度要求（查表结果视为满足）
    pub fn is_converged(&self) -> bool {
        !matches!(self.status, GramStatus::NotConverged { .. })
    }

    /// 取值，未收敛时返回 [`HgError::NonConvergence`]
    pub fn into_converged(self) -> HgResult<Float> {
        match self.status {
            GramStatus::NotConverged { iterations, delta } => {
                Err(HgError::non_convergence(&self.index, iterations, delta))
            }
            _ => Ok(self.value),
        }
    }
}

/// 求解器配置
///
/// 迭代上限至少为 1，构造与反序列化时都会拒绝 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GramSolverConfig {
    #[serde(default = "default_max_iterations")]
    max_iterations: NonZeroUsize,
}

const DEFAULT_MAX_ITERATIONS: NonZeroUsize = match NonZeroUsize::new(GRAM_LOOP_MAX) {
    Some(cap) => cap,
    None => panic!("GRAM_LOOP_MAX 必须为正"),
};

fn default_max_iterations() -> NonZeroUsize {
    DEFAULT_MAX_ITERATIONS
}

impl GramSolverConfig {
    /// 以迭代上限创建，0 返回配置错误
    pub fn new(max_iterations: usize) -> HgResult<Self> {
        let max_iterations = require!(
            NonZeroUsize::new(max_iterations),
            HgError::invalid_config("gram_max_iterations", "0", "迭代上限必须为正")
        );
        Ok(Self { max_iterations })
    }

    /// 二分迭代上限
    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations.get()
    }
}

impl Default for GramSolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

impl TryFrom<&SessionConfig> for GramSolverConfig {
    type Error = HgError;

    fn try_from(config: &SessionConfig) -> HgResult<Self> {
        Self::new(config.gram_max_iterations)
    }
}

/// Gram 点求解器
#[derive(Debug, Clone, Default)]
pub struct GramSolver {
    config: GramSolverConfig,
}

impl GramSolver {
    /// 以给定配置创建
    pub fn new(config: GramSolverConfig) -> Self {
        Self { config }
    }

    /// 配置
    pub fn config(&self) -> &GramSolverConfig {
        &self.config
    }

    /// 求 g_n
    ///
    /// n < −1 返回定义域错误；上限检查（2·10³²）由调用方负责。
    pub fn gram_at_n(
        &self,
        ctx: &PrecisionContext,
        n: &Integer,
        accuracy: DecimalAccuracy,
    ) -> HgResult<GramPoint> {
        if *n < -1 {
            return Err(HgError::out_of_domain("gram_n", n));
        }

        if *n <= GRAM_TABULATED_MAX {
            let slot = require!(
                n.to_i32().map(|i| (i + 1) as usize),
                HgError::internal("Gram 查表序号转换失败")
            );
            return Ok(GramPoint {
                index: n.clone(),
                value: ctx.parse_float(GRAM_SMALL[slot])?,
                status: GramStatus::Tabulated,
            });
        }

        Ok(self.bisect(ctx, n, accuracy))
    }

    fn bisect(&self, ctx: &PrecisionContext, n: &Integer, accuracy: DecimalAccuracy) -> GramPoint {
        let bits = ctx.bits();
        let n_float = Float::with_val(bits, n);
        let ln_n = Float::with_val(bits, n_float.ln_ref());

        // 先验区间
        let mut lower = Float::with_val(bits, &n_float / &ln_n).max(&Float::with_val(bits, 30u32));
        let x = {
            let raw = Float::with_val(bits, 6.64f64) / (Float::with_val(bits, &ln_n - 2.85f64));
            raw.max(&Float::with_val(bits, 0.5f64))
                .min(&Float::with_val(bits, 3u32))
        };
        let mut upper = (x * &n_float).max(&Float::with_val(bits, 250u32));

        let epsilon = Float::with_val(bits, 10u32).pow(-(accuracy.digits() as i32));
        let n_pi = Float::with_val(bits, &n_float * ctx.pi());

        log::trace!(
            "g_{} 二分区间 [{}, {}], ε = {}",
            n,
            lower.to_f64(),
            upper.to_f64(),
            accuracy
        );

        let mut mid = Float::new(bits);
        let mut delta = Float::new(bits);
        for iteration in 1..=self.config.max_iterations() {
            let half_width = Float::with_val(bits, &upper - &lower) / 2u32;
            mid = Float::with_val(bits, &lower + &half_width);
            delta = theta(ctx, &mid) - &n_pi;

            if Float::with_val(bits, delta.abs_ref()) < epsilon {
                log::trace!("g_{} 在第 {} 次迭代收敛", n, iteration);
                return GramPoint {
                    index: n.clone(),
                    value: mid,
                    status: GramStatus::Converged {
                        iterations: iteration,
                    },
                };
            }

            if delta.cmp0() == Some(std::cmp::Ordering::Greater) {
                upper.clone_from(&mid);
            } else {
                lower.clone_from(&mid);
            }
        }

        let delta = delta.to_f64();
        log::warn!(
            "g_{} 在 {} 次迭代内未收敛: |θ(t) − nπ| = {:e}",
            n,
            self.config.max_iterations(),
            delta.abs()
        );
        GramPoint {
            index: n.clone(),
            value: mid,
            status: GramStatus::NotConverged {
                iterations: self.config.max_iterations(),
                delta,
            },
        }
    }
}

/// 与 t 最近的下方 Gram 点序号：⌊θ(t)/π⌋
pub fn gram_near_t(ctx: &PrecisionContext, t: &Float) -> HgResult<Integer> {
    let ratio = Float::with_val(ctx.bits(), theta(ctx, t) / ctx.pi()).floor();
    let index = require!(
        ratio.to_integer(),
        HgError::out_of_domain("gram_t", t.to_string_radix(10, None))
    );
    Ok(index)
}
