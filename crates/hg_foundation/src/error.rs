// crates/hg_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `HgError` 枚举和 `HgResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义核心错误，批处理相关错误在 hg_workflow 中定义
//! 2. **易用性**: 提供便捷的构造方法
//! 3. **可追溯**: 支持错误链
//!
//! # 示例
//!
//! ```
//! use hg_foundation::error::{HgError, HgResult};
//!
//! fn check_bits(bits: u32) -> HgResult<()> {
//!     HgError::check_range("precision_bits", bits as f64, 64.0, 1024.0)
//! }
//!
//! assert!(check_bits(256).is_ok());
//! assert!(check_bits(32).is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type HgResult<T> = Result<T, HgError>;

/// HardyGram 错误类型
#[derive(Error, Debug)]
pub enum HgError {
    // ========================================================================
    // 数值域错误
    // ========================================================================

    /// 输入超出算法推导所适用的范围
    #[error("输入超出定义域: {what}={value}")]
    InputOutOfDomain {
        /// 参数名
        what: &'static str,
        /// 实际值（十进制文本，保留任意精度）
        value: String,
    },

    /// 二分迭代在上限内未达到要求的容差
    #[error("Gram 点 g_{index} 未收敛: {iterations} 次迭代后 |θ(t) - nπ| = {delta:e}")]
    NonConvergence {
        /// Gram 点序号
        index: String,
        /// 已执行的迭代次数
        iterations: usize,
        /// 最后一次的 θ(mid) - nπ
        delta: f64,
    },

    /// 精度上下文配置错误
    #[error("精度配置错误: {message}")]
    PrecisionConfiguration {
        /// 具体错误信息
        message: String,
    },

    // ========================================================================
    // 配置与解析错误
    // ========================================================================

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 数值字面量解析失败
    #[error("解析错误: '{literal}': {message}")]
    Parse {
        /// 原始文本
        literal: String,
        /// 错误信息
        message: String,
    },

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl HgError {
    /// 输入超出定义域
    pub fn out_of_domain(what: &'static str, value: impl ToString) -> Self {
        Self::InputOutOfDomain {
            what,
            value: value.to_string(),
        }
    }

    /// 二分未收敛
    pub fn non_convergence(index: impl ToString, iterations: usize, delta: f64) -> Self {
        Self::NonConvergence {
            index: index.to_string(),
            iterations,
            delta,
        }
    }

    /// 精度配置错误
    pub fn precision(message: impl Into<String>) -> Self {
        Self::PrecisionConfiguration {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 解析错误
    pub fn parse(literal: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            literal: literal.into(),
            message: message.to_string(),
        }
    }

    /// IO 错误
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否为可恢复的未收敛诊断
    pub fn is_non_convergence(&self) -> bool {
        matches!(self, Self::NonConvergence { .. })
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl HgError {
    /// 检查值是否在闭区间内
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> HgResult<()> {
        if value.is_nan() || value < min || value > max {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }

    /// 检查整数是否在闭区间内
    #[inline]
    pub fn check_int_range(field: &'static str, value: i64, min: i64, max: i64) -> HgResult<()> {
        if value < min || value > max {
            Err(Self::out_of_range(field, value as f64, min as f64, max as f64))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for HgError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 宏
// ========================================================================

/// 条件不满足时提前返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

/// 从 `Option` 取值，`None` 时提前返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr $(,)?) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}

// ========================================================================
// 测试
// ========================================================================
