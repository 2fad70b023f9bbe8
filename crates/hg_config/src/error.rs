// crates/hg_config/src/error.rs

//! 配置层错误类型

use hg_foundation::HgError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 精度上下文无法建立
    #[error(transparent)]
    Precision(#[from] HgError),
}

impl From<ConfigError> for HgError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => HgError::from(e),
            ConfigError::Parse(message) => HgError::parse("session config", message),
            ConfigError::InvalidValue { key, value, reason } => {
                HgError::invalid_config(key, value, reason)
            }
            ConfigError::Precision(e) => e,
        }
    }
}
