// crates/hg_numerics/src/theta.rs

//! Riemann-Siegel θ(t)
//!
//! 渐近公式：
//!
//! ```text
//! θ(t) = (t/2)·(ln(t/2π) − 1) + 1/(48t) − π/8 + 7/(5760·t³)
//! ```
//!
//! 三次项在 t 足够大时省略。截断阈值取
//! `max(1.1e12, (14/5760 · 2^bits)^(1/4))`：第二项保证省略的量
//! 小于 θ(t)/2^bits，即不改变工作精度下的最后一位。

use hg_config::PrecisionContext;
use rug::ops::Pow;
use rug::Float;

/// 三次项截断的最小阈值
pub const THETA_MAX_T_POWER3: f64 = 1.1e12;

/// 给定位宽下三次项可以省略的 t 阈值
pub fn cubic_term_cutoff(bits: u32) -> f64 {
    // θ(t) ≥ t/2 时，7/(5760 t³) < (t/2)·2^-bits ⇔ t⁴ > (14/5760)·2^bits
    let visible = (14.0f64 / 5760.0).powf(0.25) * 2f64.powf(bits as f64 / 4.0);
    visible.max(THETA_MAX_T_POWER3)
}

/// 计算 θ(t)，要求 t > 0
///
/// 结果位宽与上下文一致。
pub fn theta(ctx: &PrecisionContext, t: &Float) -> Float {
    let bits = ctx.bits();

    let t_over_2 = Float::with_val(bits, t / 2u32);
    let log_t_over_2pi = Float::with_val(bits, &t_over_2 / ctx.pi()).ln();
    let pi_over_8 = Float::with_val(bits, ctx.pi() / 8u32);
    let recip_48t = Float::with_val(bits, t * 48u32).recip();

    // 次要项：1/(48t) − π/8 [+ 7/(5760 t³)]
    let mut minor = recip_48t - &pi_over_8;
    if *t < cubic_term_cutoff(bits) {
        let power3 = Float::with_val(bits, t.pow(-3i32)) * 7u32 / 5760u32;
        minor += power3;
    }

    // 主项：(t/2)·(ln(t/2π) − 1)
    let major = (log_t_over_2pi - 1u32) * &t_over_2;
    major + minor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PrecisionContext {
        PrecisionContext::new(256).unwrap()
    }

    #[test]
    fn test_theta_at_100() {
        let ctx = ctx();
        let t = ctx.float(100u32);
        let expected = ctx.parse_float("87.9721652317871811800694525161").unwrap();
        let diff = Float::with_val(256, theta(&ctx, &t) - &expected).abs();
        assert!(diff < 1e-25, "diff = {}", diff);
    }

    #[test]
    fn test_theta_near_first_gram_point() {
        // 表中 g_0 由完整的 θ 给出，渐近公式在 t ≈ 18 处的截断误差约 2e-10
        let ctx = ctx();
        let g0 = ctx.parse_float("17.8455995404108608168263384125190970356932874").unwrap();
        assert!(theta(&ctx, &g0).abs() < 1e-9);
    }

    #[test]
    fn test_theta_negative_below_g0() {
        let ctx = ctx();
        let t = ctx.float(10u32);
        assert!(theta(&ctx, &t) < 0);
    }

    #[test]
    fn test_result_precision_follows_context() {
        let ctx = PrecisionContext::new(128).unwrap();
        let t = Float::with_val(64, 1000u32);
        assert_eq!(theta(&ctx, &t).prec(), 128);
    }

    #[test]
    fn test_cutoff_never_below_fixed_threshold() {
        assert_eq!(cubic_term_cutoff(64), THETA_MAX_T_POWER3);
        assert!(cubic_term_cutoff(256) > 4e18);
        assert!(cubic_term_cutoff(1024) > cubic_term_cutoff(256));
    }

    #[test]
    fn test_cubic_term_omission_invisible() {
        // 阈值之上补回三次项，结果不变
        let ctx = PrecisionContext::new(64).unwrap();
        let t = ctx.float(2e12);
        let without = theta(&ctx, &t);
        let cubic = Float::with_val(64, t.pow(-3i32)) * 7u32 / 5760u32;
        let with = Float::with_val(64, &without + &cubic);
        assert_eq!(with, without);
    }
}
