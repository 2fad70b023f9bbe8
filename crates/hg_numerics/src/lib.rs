// crates/hg_numerics/src/lib.rs

//! HardyGram 数值核心
//!
//! 临界线上的任意精度数值计算：
//! - Riemann-Siegel θ 函数 (theta)
//! - Riemann-Siegel 主和 (main_term)
//! - Gabcke 余项级数及其系数表 (remainder, gabcke)
//! - Hardy Z 函数 (hardy_z)
//! - Gram 点求解与反查 (gram)
//! - 会话封装 (session)
//!
//! 所有函数都以 `&PrecisionContext` 取得位宽与常数，不读写任何全局状态。
//! 结果只依赖输入与位宽，同一输入在任意线程上逐位一致。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod gabcke;
mod gabcke_table;
pub mod gram;
pub mod hardy_z;
pub mod main_term;
pub mod remainder;
pub mod session;
pub mod theta;

// 重导出常用类型
pub use gabcke::GabckeTable;
pub use gram::{gram_near_t, GramPoint, GramSolver, GramSolverConfig, GramStatus};
pub use hardy_z::{HardyZEvaluator, HardyZParts, RsDecomposition};
pub use main_term::rs_main_term;
pub use remainder::{rs_remainder, Parity};
pub use session::CriticalLineSession;
pub use theta::theta;

/// 预导入模块
pub mod prelude {
    pub use crate::gabcke::GabckeTable;
    pub use crate::gram::{gram_near_t, GramPoint, GramSolver, GramStatus};
    pub use crate::hardy_z::HardyZEvaluator;
    pub use crate::session::CriticalLineSession;
    pub use crate::theta::theta;
    pub use hg_config::PrecisionContext;
    pub use hg_foundation::{DecimalAccuracy, HgError, HgResult};
}
