// crates/hg_config/src/lib.rs

//! HardyGram Config Layer
//!
//! 配置层，提供精度上下文、会话配置和数值定义域。
//!
//! # 模块概览
//!
//! - [`precision`]: `Precision` 位宽与只读的 `PrecisionContext`
//! - [`session_config`]: `SessionConfig` 会话配置（JSON）
//! - [`limits`]: 算法推导所适用的参数范围
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! hg_workflow   ─> BatchHardyZDriver
//! hg_numerics   ─> theta, Hardy Z, Gram 点
//! hg_config     ─> Precision, PrecisionContext, SessionConfig (本层)
//! hg_foundation ─> HgError, DecimalAccuracy
//! ```
//!
//! # 设计原则
//!
//! 1. **无全局状态**: 精度上下文是显式对象，按引用传递
//! 2. **构造即验证**: 位宽与精度要求在构造或反序列化时检查
//! 3. **只读共享**: 上下文建立后不可变，可跨线程无锁读取

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod precision;
pub mod session_config;

// 重导出核心类型
pub use error::ConfigError;
pub use precision::{Precision, PrecisionContext, PrecisionParseError};
pub use session_config::SessionConfig;
