// crates/hg_numerics/src/main_term.rs

//! Riemann-Siegel 主和
//!
//! ```text
//! Main(t, N) = 2 · Σ_{n=1}^{N} cos(θ(t) − t·ln n) / √n
//! ```
//!
//! n 从小到大依次累加。有限精度下加法不满足结合律，
//! 改变求和顺序会破坏逐位可复现性。

use hg_config::PrecisionContext;
use rug::Float;

use crate::theta::theta;

/// 计算主和，`n_max < 1` 时精确返回 0
///
/// `bits` 必须等于上下文位宽，否则 panic。
pub fn rs_main_term(ctx: &PrecisionContext, t: &Float, n_max: u64, bits: u32) -> Float {
    assert_eq!(ctx.bits(), bits, "主和位宽与精度上下文不一致");

    if n_max < 1 {
        return Float::new(bits);
    }

    let theta_t = theta(ctx, t);

    // n = 1：ln 1 = 0，项退化为 cos θ(t)
    let mut main = Float::with_val(bits, theta_t.cos_ref());

    for n in 2..=n_max {
        let n_float = Float::with_val(bits, n);
        let recip_sqrt_n = Float::with_val(bits, n_float.recip_sqrt_ref());

        // θ(t) − t·ln n
        let t_log_n = n_float.ln() * t;
        let cos_arg = Float::with_val(bits, &theta_t - &t_log_n);

        main += recip_sqrt_n * cos_arg.cos();
    }

    main * 2u32
}
