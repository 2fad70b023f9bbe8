// crates/hg_config/src/limits.rs

//! 数值定义域与会话参数的取值范围
//!
//! 所有算法只在这些范围内推导过。调用方（命令行、上层服务）负责在
//! 进入计算核心前完成验证，核心热路径不再重复检查。
//!
//! | 参数 | 范围 | 说明 |
//! |------|------|------|
//! | Hardy t | [1, 1.15e20] | 超出后主和截断指标 N 超过 u64 |
//! | t 增量 | [1e-32, 1.15e10] | |
//! | 批量数 | [1, 9999] | |
//! | Gram t | [100, 2e30] | |
//! | Gram N | [-1, 2e32] | |
//! | Gram 精度 | [1, 32] 位十进制 | |
//! | 线程数 | [1, 8] | |
//! | 位宽 | [64, 1024] | 默认 256 |

use hg_foundation::{HgError, HgResult};

/// 默认位宽
pub const PRECISION_BITS_DEFAULT: u32 = 256;
/// 最小位宽
pub const PRECISION_BITS_MIN: u32 = 64;
/// 最大位宽
pub const PRECISION_BITS_MAX: u32 = 1024;

/// 最少工作线程
pub const WORKERS_MIN: usize = 1;
/// 最多工作线程
pub const WORKERS_MAX: usize = 8;

/// Hardy Z 的 t 下限
pub const HARDY_T_MIN: f64 = 1.0;
/// Hardy Z 的 t 上限
pub const HARDY_T_MAX: f64 = 1.15e20;

/// t 增量下限
pub const T_INCR_MIN: f64 = 1e-32;
/// t 增量上限
pub const T_INCR_MAX: f64 = 1.15e10;

/// 批量最少个数
pub const COUNT_MIN: usize = 1;
/// 批量最多个数
pub const COUNT_MAX: usize = 9999;

/// Gram 反查 t 下限
pub const GRAM_T_MIN: f64 = 100.0;
/// Gram 反查 t 上限
pub const GRAM_T_MAX: f64 = 2e30;

/// Gram 序号下限
pub const GRAM_N_MIN: f64 = -1.0;
/// Gram 序号上限
pub const GRAM_N_MAX: f64 = 2e32;

/// 二分迭代默认上限
pub const GRAM_LOOP_MAX: usize = 1000;

/// 检查 Hardy Z 的 t
pub fn check_hardy_t(t: f64) -> HgResult<()> {
    HgError::check_range("hardy_t", t, HARDY_T_MIN, HARDY_T_MAX)
}

/// 检查 t 增量
pub fn check_increment(incr: f64) -> HgResult<()> {
    HgError::check_range("t_increment", incr, T_INCR_MIN, T_INCR_MAX)
}

/// 检查批量个数
pub fn check_count(count: usize) -> HgResult<()> {
    HgError::check_int_range("count", count as i64, COUNT_MIN as i64, COUNT_MAX as i64)
}

/// 检查工作线程数
pub fn check_workers(workers: usize) -> HgResult<()> {
    HgError::check_int_range(
        "workers",
        workers as i64,
        WORKERS_MIN as i64,
        WORKERS_MAX as i64,
    )
}

/// 检查 Gram 反查的 t
pub fn check_gram_t(t: f64) -> HgResult<()> {
    HgError::check_range("gram_t", t, GRAM_T_MIN, GRAM_T_MAX)
}

/// 检查 Gram 序号
pub fn check_gram_n(n: f64) -> HgResult<()> {
    HgError::check_range("gram_n", n, GRAM_N_MIN, GRAM_N_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardy_t_range() {
        assert!(check_hardy_t(14.134725).is_ok());
        assert!(check_hardy_t(0.5).is_err());
        assert!(check_hardy_t(2e20).is_err());
    }

    #[test]
    fn test_increment_range() {
        assert!(check_increment(1e-32).is_ok());
        assert!(check_increment(0.0).is_err());
        assert!(check_increment(-1.0).is_err());
    }

    #[test]
    fn test_count_and_workers() {
        assert!(check_count(1).is_ok());
        assert!(check_count(9999).is_ok());
        assert!(check_count(0).is_err());
        assert!(check_count(10_000).is_err());
        assert!(check_workers(8).is_ok());
        assert!(check_workers(9).is_err());
    }

    #[test]
    fn test_gram_ranges() {
        assert!(check_gram_t(100.0).is_ok());
        assert!(check_gram_t(99.0).is_err());
        assert!(check_gram_n(-1.0).is_ok());
        assert!(check_gram_n(-2.0).is_err());
        assert!(check_gram_n(1e32).is_ok());
    }
}
