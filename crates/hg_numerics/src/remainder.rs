// crates/hg_numerics/src/remainder.rs

//! Riemann-Siegel 余项（Gabcke 级数）
//!
//! ```text
//! R = (−1)^(N−1) · (t/2π)^(−1/4) · Σ_{j=0}^{4} C_j(p) · (t/2π)^(−j/2)
//! C_j(p) = Σ_{i=0}^{43} coeff[j][i] · (1 − 2p)^(2i + j mod 2)
//! ```
//!
//! 两层累加的顺序固定：内层按 i 升序，外层按 j 升序。
//! 符号约定（N 为偶数时取负，变量取 1 − 2p）已用公开的 Z(t) 参考值核对。

use rug::ops::Pow;
use rug::Float;
use serde::{Deserialize, Serialize};

use crate::gabcke::{GabckeTable, GABCKE_NUM_POWERS_P};

/// 主和截断指标 N 的奇偶性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    /// 偶数
    Even,
    /// 奇数
    Odd,
}

impl Parity {
    /// 求 n 的奇偶性
    #[inline]
    pub fn of(n: u64) -> Self {
        if n % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }

    /// 是否为偶数
    #[inline]
    pub fn is_even(&self) -> bool {
        matches!(self, Self::Even)
    }
}

/// 计算余项
///
/// - `t_over_2pi`: t/2π
/// - `parity`: N 的奇偶性
/// - `p`: √(t/2π) 的小数部分
/// - `bits`: 必须与系数表位宽一致，否则 panic
pub fn rs_remainder(
    table: &GabckeTable,
    t_over_2pi: &Float,
    parity: Parity,
    p: &Float,
    bits: u32,
) -> Float {
    assert_eq!(table.bits(), bits, "系数表与请求的位宽不一致");

    // (t/2π)^(-1/4)：先取倒数平方根，再开方
    let t_fraction = Float::with_val(bits, t_over_2pi.recip_sqrt_ref()).sqrt();

    // FACTOR = tFraction · (−1)^(N−1)
    let factor = if parity.is_even() {
        -t_fraction.clone()
    } else {
        t_fraction.clone()
    };

    // AdjP = 1 − 2P，预计算 AdjP^0..AdjP^87
    let adj_p = 1u32 - Float::with_val(bits, p * 2u32);
    let mut powers = Vec::with_capacity(GABCKE_NUM_POWERS_P);
    powers.push(Float::with_val(bits, 1u32));
    for k in 1..GABCKE_NUM_POWERS_P {
        let next = Float::with_val(bits, &powers[k - 1] * &adj_p);
        powers.push(next);
    }

    let mut total = Float::new(bits);
    for (j, row) in table.rows().enumerate() {
        // 偶数 C_j 占偶次幂，奇数 C_j 占奇次幂
        let offset = j % 2;
        let mut cj = Float::new(bits);
        for (i, coeff) in row.iter().enumerate() {
            cj += Float::with_val(bits, &powers[2 * i + offset] * coeff);
        }
        log::trace!("余项 C{} = {:e}", j, cj.to_f64());

        let scale = Float::with_val(bits, (&t_fraction).pow(2 * j as u32));
        total += scale * cj;
    }

    total * factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_config::PrecisionContext;

    fn setup() -> (PrecisionContext, GabckeTable) {
        let ctx = PrecisionContext::new(256).unwrap();
        let table = GabckeTable::new(&ctx).unwrap();
        (ctx, table)
    }

    #[test]
    fn test_parity() {
        assert_eq!(Parity::of(0), Parity::Even);
        assert_eq!(Parity::of(3), Parity::Odd);
        assert!(Parity::of(8).is_even());
    }

    #[test]
    fn test_remainder_at_100() {
        let (ctx, table) = setup();
        let t_over_2pi = Float::with_val(256, ctx.float(100u32) / ctx.two_pi());
        let p = Float::with_val(256, t_over_2pi.sqrt_ref()) - 3u32;
        let r = rs_remainder(&table, &t_over_2pi, Parity::Odd, &p, 256);
        let expected = ctx.parse_float("0.4532459372702074464994697").unwrap();
        let diff = Float::with_val(256, &r - &expected).abs();
        assert!(diff < 1e-22, "diff = {}", diff);
    }

    #[test]
    #[should_panic(expected = "位宽不一致")]
    fn test_mismatched_bits_panics() {
        let (ctx, table) = setup();
        let t_over_2pi = ctx.float(50u32);
        let p = ctx.float(0.25f64);
        rs_remainder(&table, &t_over_2pi, Parity::Odd, &p, 128);
    }

    #[test]
    fn test_parity_flips_sign() {
        let (ctx, table) = setup();
        let t_over_2pi = ctx.float(50u32);
        let p = ctx.float(0.25f64);
        let odd = rs_remainder(&table, &t_over_2pi, Parity::Odd, &p, 256);
        let even = rs_remainder(&table, &t_over_2pi, Parity::Even, &p, 256);
        assert_eq!(odd, -even);
    }

    #[test]
    fn test_midpoint_uses_only_constant_terms() {
        // p = 1/2 ⇒ AdjP = 0，只剩 C0、C2、C4 的常数项
        let (ctx, table) = setup();
        let t_over_2pi = ctx.float(16u32);
        let p = ctx.float(0.5f64);
        let r = rs_remainder(&table, &t_over_2pi, Parity::Odd, &p, 256);

        // tFraction = 16^(-1/4) = 1/2
        let expected = (Float::with_val(256, table.coefficient(0, 0))
            + Float::with_val(256, table.coefficient(2, 0)) / 16u32
            + Float::with_val(256, table.coefficient(4, 0)) / 256u32)
            / 2u32;
        let diff = Float::with_val(256, &r - &expected).abs();
        assert!(diff < 1e-70, "diff = {}", diff);
    }
}
