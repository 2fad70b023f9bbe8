// crates/hg_numerics/src/gabcke.rs

//! Gabcke 系数矩阵
//!
//! 把 5 × 44 的十进制字面量按精度上下文的位宽解析一次，之后只读共享。
//! 表内只有 `rug::Float`，可在工作线程间无锁读取。

use hg_config::PrecisionContext;
use hg_foundation::{HgError, HgResult};
use rug::Float;

use crate::gabcke_table::GABCKE_LITERALS;

/// 每个 C_j 的系数个数
pub const GABCKE_COEFF_PER_CJ: usize = 44;
/// C_j 项数
pub const GABCKE_NUM_CJ_TERMS: usize = 5;
/// 字面量小数位数
pub const GABCKE_DECIMAL_PLACES: usize = 50;
/// 需要的 (1 − 2p) 幂次个数：0..=87
pub const GABCKE_NUM_POWERS_P: usize = 2 * GABCKE_COEFF_PER_CJ;

/// 已解析的系数矩阵
#[derive(Debug, Clone)]
pub struct GabckeTable {
    bits: u32,
    rows: Vec<Vec<Float>>,
}

impl GabckeTable {
    /// 按上下文位宽构造系数矩阵
    pub fn new(ctx: &PrecisionContext) -> HgResult<Self> {
        let rows = GABCKE_LITERALS
            .iter()
            .map(|row| {
                row.iter()
                    .map(|literal| ctx.parse_float(literal))
                    .collect::<HgResult<Vec<_>>>()
            })
            .collect::<HgResult<Vec<_>>>()?;

        if rows.len() != GABCKE_NUM_CJ_TERMS
            || rows.iter().any(|r| r.len() != GABCKE_COEFF_PER_CJ)
        {
            return Err(HgError::internal("Gabcke 系数表形状错误"));
        }

        log::debug!(
            "Gabcke 系数表已加载: {}×{} @ {} bits",
            GABCKE_NUM_CJ_TERMS,
            GABCKE_COEFF_PER_CJ,
            ctx.bits()
        );
        Ok(Self {
            bits: ctx.bits(),
            rows,
        })
    }

    /// 系数位宽
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// C_j 的第 i 个系数
    #[inline]
    pub fn coefficient(&self, j: usize, i: usize) -> &Float {
        &self.rows[j][i]
    }

    /// 按 j 升序遍历各行
    pub fn rows(&self) -> impl Iterator<Item = &[Float]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }
}
