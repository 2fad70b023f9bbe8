// crates/hg_numerics/src/hardy_z.rs

//! Hardy Z 函数
//!
//! Z(t) = Main(t, N) + R(t)，其中 N = ⌊√(t/2π)⌋，p = √(t/2π) − N。
//!
//! 求值器只持有精度上下文与系数表的共享引用，可以 `Copy` 到任意多个
//! 工作线程中并发调用。

use std::cmp::Ordering;

use hg_config::PrecisionContext;
use hg_foundation::{require, HgError, HgResult};
use rug::Float;

use crate::gabcke::GabckeTable;
use crate::main_term::rs_main_term;
use crate::remainder::{rs_remainder, Parity};

/// 单个 t 的 Riemann-Siegel 分解
#[derive(Debug, Clone)]
pub struct RsDecomposition {
    /// t/2π
    pub t_over_2pi: Float,
    /// 主和截断指标 N
    pub n: u64,
    /// √(t/2π) 的小数部分
    pub p: Float,
    /// N 的奇偶性
    pub parity: Parity,
}

impl RsDecomposition {
    /// 分解 t，N 超出 u64 时返回定义域错误
    pub fn decompose(ctx: &PrecisionContext, t: &Float) -> HgResult<Self> {
        let bits = ctx.bits();
        let t_over_2pi = Float::with_val(bits, t / ctx.two_pi());
        let root = Float::with_val(bits, t_over_2pi.sqrt_ref());
        let (whole, p) = root.trunc_fract(Float::new(bits));

        let n = require!(
            whole.to_integer().and_then(|i| i.to_u64()),
            HgError::out_of_domain("N", whole.to_string_radix(10, None))
        );

        Ok(Self {
            t_over_2pi,
            n,
            p,
            parity: Parity::of(n),
        })
    }
}

/// Z(t) 的两部分
#[derive(Debug, Clone)]
pub struct HardyZParts {
    /// 主和
    pub main: Float,
    /// Gabcke 余项
    pub remainder: Float,
    /// 主和截断指标
    pub n: u64,
}

impl HardyZParts {
    /// Z = 主和 + 余项
    pub fn value(&self) -> Float {
        Float::with_val(self.main.prec(), &self.main + &self.remainder)
    }
}

/// Hardy Z 求值器
#[derive(Debug, Clone, Copy)]
pub struct HardyZEvaluator<'a> {
    ctx: &'a PrecisionContext,
    table: &'a GabckeTable,
}

impl<'a> HardyZEvaluator<'a> {
    /// 创建求值器，系数表必须与上下文同位宽
    pub fn new(ctx: &'a PrecisionContext, table: &'a GabckeTable) -> HgResult<Self> {
        if table.bits() != ctx.bits() {
            return Err(HgError::precision(format!(
                "系数表位宽 {} 与上下文位宽 {} 不一致",
                table.bits(),
                ctx.bits()
            )));
        }
        Ok(Self { ctx, table })
    }

    /// 由已知同位宽的上下文与系数表直接构造
    pub(crate) fn from_parts(ctx: &'a PrecisionContext, table: &'a GabckeTable) -> Self {
        debug_assert_eq!(ctx.bits(), table.bits());
        Self { ctx, table }
    }

    /// 精度上下文
    #[inline]
    pub fn context(&self) -> &'a PrecisionContext {
        self.ctx
    }

    /// 分别返回主和与余项
    pub fn evaluate_parts(&self, t: &Float) -> HgResult<HardyZParts> {
        if t.cmp0() != Some(Ordering::Greater) {
            return Err(HgError::out_of_domain("t", t.to_string_radix(10, None)));
        }

        let bits = self.ctx.bits();
        let parts = RsDecomposition::decompose(self.ctx, t)?;
        let main = rs_main_term(self.ctx, t, parts.n, bits);
        let remainder = rs_remainder(self.table, &parts.t_over_2pi, parts.parity, &parts.p, bits);

        Ok(HardyZParts {
            main,
            remainder,
            n: parts.n,
        })
    }

    /// 计算 Z(t)
    pub fn evaluate(&self, t: &Float) -> HgResult<Float> {
        self.evaluate_parts(t).map(|parts| parts.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PrecisionContext, GabckeTable) {
        let ctx = PrecisionContext::new(256).unwrap();
        let table = GabckeTable::new(&ctx).unwrap();
        (ctx, table)
    }

    #[test]
    fn test_decompose_at_100() {
        let (ctx, _) = setup();
        let parts = RsDecomposition::decompose(&ctx, &ctx.float(100u32)).unwrap();
        assert_eq!(parts.n, 3);
        assert_eq!(parts.parity, Parity::Odd);
        assert!((parts.p.to_f64() - 0.989_422_804_014_327).abs() < 1e-12);
    }

    #[test]
    fn test_decompose_below_2pi() {
        // t < 2π ⇒ N = 0，主和为 0
        let (ctx, _) = setup();
        let parts = RsDecomposition::decompose(&ctx, &ctx.float(3u32)).unwrap();
        assert_eq!(parts.n, 0);
        assert_eq!(parts.parity, Parity::Even);
    }

    #[test]
    fn test_huge_t_out_of_domain() {
        let (ctx, table) = setup();
        let evaluator = HardyZEvaluator::new(&ctx, &table).unwrap();
        let t = ctx.parse_float("1e60").unwrap();
        let err = evaluator.evaluate(&t).unwrap_err();
        assert!(matches!(err, HgError::InputOutOfDomain { what: "N", .. }));
    }

    #[test]
    fn test_non_positive_t_rejected() {
        let (ctx, table) = setup();
        let evaluator = HardyZEvaluator::new(&ctx, &table).unwrap();
        assert!(evaluator.evaluate(&ctx.float(0u32)).is_err());
        assert!(evaluator.evaluate(&ctx.float(-5i32)).is_err());
    }

    #[test]
    fn test_mismatched_table_rejected() {
        let ctx = PrecisionContext::new(256).unwrap();
        let other = PrecisionContext::new(128).unwrap();
        let table = GabckeTable::new(&other).unwrap();
        assert!(HardyZEvaluator::new(&ctx, &table).is_err());
    }

    #[test]
    fn test_z_at_100_is_sum_of_parts() {
        let (ctx, table) = setup();
        let evaluator = HardyZEvaluator::new(&ctx, &table).unwrap();
        let t = ctx.float(100u32);
        let parts = evaluator.evaluate_parts(&t).unwrap();
        assert_eq!(parts.n, 3);

        let z = evaluator.evaluate(&t).unwrap();
        let expected = ctx.parse_float("2.6926970193916509531910217").unwrap();
        let diff = Float::with_val(256, &z - &expected).abs();
        assert!(diff < 1e-22, "diff = {}", diff);
    }
}
