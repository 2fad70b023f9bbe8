// crates/hg_config/src/precision.rs

//! 精度选择与精度上下文
//!
//! 提供两个类型：
//!
//! - [`Precision`]: 有效数字位宽（可序列化、可解析），构造时即验证范围
//! - [`PrecisionContext`]: 一次会话的只读数值环境，缓存该位宽下的 π、2π、ln 2
//!
//! 精度上下文替代进程级全局变量，以引用方式传入各计算组件。
//! 不同位宽的上下文可以在同一进程中并存（例如并行测试）。

use hg_foundation::{HgError, HgResult};
use rug::float::Constant;
use rug::Float;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::limits::{PRECISION_BITS_DEFAULT, PRECISION_BITS_MAX, PRECISION_BITS_MIN};

/// 有效数字位宽
///
/// # 示例
///
/// ```rust
/// use hg_config::Precision;
///
/// let precision = Precision::default();
/// assert_eq!(precision.bits(), 256);
///
/// let precision: Precision = "512".parse().unwrap();
/// assert_eq!(precision.bits(), 512);
/// assert!("32".parse::<Precision>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u32);

impl Precision {
    /// 创建位宽，超出 [64, 1024] 时返回精度配置错误
    pub fn new(bits: u32) -> HgResult<Self> {
        if !(PRECISION_BITS_MIN..=PRECISION_BITS_MAX).contains(&bits) {
            return Err(HgError::precision(format!(
                "位宽 {} 超出范围 [{}, {}]",
                bits, PRECISION_BITS_MIN, PRECISION_BITS_MAX
            )));
        }
        Ok(Self(bits))
    }

    /// 位宽
    #[inline]
    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(PRECISION_BITS_DEFAULT)
    }
}

impl TryFrom<u32> for Precision {
    type Error = HgError;

    fn try_from(bits: u32) -> HgResult<Self> {
        Self::new(bits)
    }
}

impl From<Precision> for u32 {
    fn from(p: Precision) -> u32 {
        p.0
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.0)
    }
}

/// 精度解析错误
#[derive(Debug, Clone)]
pub struct PrecisionParseError(String);

impl FromStr for Precision {
    type Err = PrecisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix("bits").unwrap_or(trimmed).trim();
        digits
            .parse::<u32>()
            .ok()
            .and_then(|bits| Self::new(bits).ok())
            .ok_or_else(|| PrecisionParseError(s.to_string()))
    }
}

impl fmt::Display for PrecisionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "无效的精度值: '{}', 期望 {} 到 {} 之间的位宽",
            self.0, PRECISION_BITS_MIN, PRECISION_BITS_MAX
        )
    }
}

impl std::error::Error for PrecisionParseError {}

/// 会话级精度上下文（只读）
///
/// 在任何数值计算开始前构造一次，之后只以 `&PrecisionContext` 共享。
/// 内部只有不可变数据，`Sync` 由 `rug::Float` 保证，多线程读取无需加锁。
///
/// # 示例
///
/// ```rust
/// use hg_config::PrecisionContext;
///
/// let ctx = PrecisionContext::new(128).unwrap();
/// assert_eq!(ctx.bits(), 128);
/// assert!((ctx.pi().to_f64() - std::f64::consts::PI).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct PrecisionContext {
    precision: Precision,
    pi: Float,
    two_pi: Float,
    ln2: Float,
}

impl PrecisionContext {
    /// 以给定位宽构造上下文
    pub fn new(bits: u32) -> HgResult<Self> {
        Ok(Self::with_precision(Precision::new(bits)?))
    }

    /// 以已验证的位宽构造上下文
    pub fn with_precision(precision: Precision) -> Self {
        let bits = precision.bits();
        let pi = Float::with_val(bits, Constant::Pi);
        let two_pi = pi.clone() * 2u32;
        let ln2 = Float::with_val(bits, Constant::Log2);
        log::debug!("精度上下文已建立: {}", precision);
        Self {
            precision,
            pi,
            two_pi,
            ln2,
        }
    }

    /// 位宽
    #[inline]
    pub fn bits(&self) -> u32 {
        self.precision.bits()
    }

    /// 位宽（类型化）
    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// π
    #[inline]
    pub fn pi(&self) -> &Float {
        &self.pi
    }

    /// 2π
    #[inline]
    pub fn two_pi(&self) -> &Float {
        &self.two_pi
    }

    /// ln 2
    #[inline]
    pub fn ln2(&self) -> &Float {
        &self.ln2
    }

    /// 以本上下文位宽创建一个浮点数
    #[inline]
    pub fn float<T>(&self, value: T) -> Float
    where
        Float: rug::Assign<T>,
    {
        Float::with_val(self.bits(), value)
    }

    /// 以本上下文位宽解析十进制文本
    pub fn parse_float(&self, literal: &str) -> HgResult<Float> {
        let parsed = Float::parse(literal).map_err(|e| HgError::parse(literal, e))?;
        Ok(Float::with_val(self.bits(), parsed))
    }
}

impl Default for PrecisionContext {
    fn default() -> Self {
        Self::with_precision(Precision::default())
    }
}
