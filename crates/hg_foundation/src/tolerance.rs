// crates/hg_foundation/src/tolerance.rs

//! 十进制精度要求
//!
//! Gram 点求解的容差以"正确的十进制位数"给出，
//! 对应绝对容差 ε = 10^(-digits)。
//!
//! 本模块只负责位数的合法性，任意精度的 ε 由 `hg_numerics` 在
//! 具体的精度上下文中构造。
//!
//! # 示例
//!
//! ```
//! use hg_foundation::tolerance::DecimalAccuracy;
//!
//! let acc = DecimalAccuracy::new(15).unwrap();
//! assert_eq!(acc.to_string(), "1e-15");
//! assert!(DecimalAccuracy::new(0).is_err());
//! ```

use crate::error::{HgError, HgResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 十进制精度要求（位数）
///
/// 取值范围 [`DecimalAccuracy::MIN`, `DecimalAccuracy::MAX`]，反序列化时同样验证。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DecimalAccuracy(u32);

impl DecimalAccuracy {
    /// 最少位数
    pub const MIN: u32 = 1;
    /// 最多位数
    pub const MAX: u32 = 32;

    /// 创建精度要求
    pub fn new(digits: u32) -> HgResult<Self> {
        HgError::check_int_range(
            "gram_accuracy",
            digits as i64,
            Self::MIN as i64,
            Self::MAX as i64,
        )?;
        Ok(Self(digits))
    }

    /// 十进制位数
    #[inline]
    pub fn digits(&self) -> u32 {
        self.0
    }

    /// 表示 ε 至少需要的二进制位数（log2(10) ≈ 3.3219）
    pub fn required_bits(&self) -> u32 {
        (self.0 as f64 * std::f64::consts::LOG2_10).ceil() as u32
    }
}

impl Default for DecimalAccuracy {
    fn default() -> Self {
        Self(15)
    }
}

impl TryFrom<u32> for DecimalAccuracy {
    type Error = HgError;

    fn try_from(digits: u32) -> HgResult<Self> {
        Self::new(digits)
    }
}

impl From<DecimalAccuracy> for u32 {
    fn from(acc: DecimalAccuracy) -> u32 {
        acc.0
    }
}

impl fmt::Display for DecimalAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1e-{}", self.0)
    }
}
