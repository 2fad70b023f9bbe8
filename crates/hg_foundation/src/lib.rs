// crates/hg_foundation/src/lib.rs

//! HardyGram Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型与范围检查
//! - [`tolerance`]: 十进制精度要求（Gram 点容差）
//!
//! # 设计原则
//!
//! 1. **零数值依赖**: 仅依赖 serde 和 thiserror，任意精度类型在上层引入
//! 2. **类型安全**: 精度要求用新类型表达，构造时即验证
//!
//! # 示例
//!
//! ```
//! use hg_foundation::{DecimalAccuracy, HgResult};
//!
//! fn accuracy() -> HgResult<DecimalAccuracy> {
//!     DecimalAccuracy::new(15)
//! }
//!
//! assert_eq!(accuracy().unwrap().digits(), 15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod tolerance;

// 重导出常用类型
pub use error::{HgError, HgResult};
pub use tolerance::DecimalAccuracy;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{HgError, HgResult};
    pub use crate::tolerance::DecimalAccuracy;
    pub use crate::{ensure, require};
}
