// crates/hg_config/src/session_config.rs

//! SessionConfig - 计算会话配置
//!
//! 一次会话内固定的参数：位宽、工作线程数、Gram 二分迭代上限与默认精度要求。
//! 可从 JSON 文件加载，加载后立即验证。

use hg_foundation::DecimalAccuracy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::limits::{GRAM_LOOP_MAX, WORKERS_MAX, WORKERS_MIN};
use crate::precision::{Precision, PrecisionContext};

/// 计算会话配置
///
/// # 示例
///
/// ```rust
/// use hg_config::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(r#"{ "workers": 4 }"#).unwrap();
/// assert_eq!(config.workers, 4);
/// assert_eq!(config.precision.bits(), 256);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 有效数字位宽
    #[serde(default)]
    pub precision: Precision,

    /// 批量计算的工作线程上限
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Gram 点二分迭代上限
    #[serde(default = "default_gram_max_iterations")]
    pub gram_max_iterations: usize,

    /// Gram 点默认精度要求（十进制位数）
    #[serde(default)]
    pub gram_accuracy: DecimalAccuracy,
}

fn default_workers() -> usize { WORKERS_MIN }
fn default_gram_max_iterations() -> usize { GRAM_LOOP_MAX }

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            workers: default_workers(),
            gram_max_iterations: default_gram_max_iterations(),
            gram_accuracy: DecimalAccuracy::default(),
        }
    }
}

impl SessionConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(ConfigError::Io)?;

        let config: SessionConfig = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 线程数验证
        if !(WORKERS_MIN..=WORKERS_MAX).contains(&self.workers) {
            return Err(ConfigError::InvalidValue {
                key: "workers".to_string(),
                value: self.workers.to_string(),
                reason: format!("线程数必须在 [{}, {}] 范围内", WORKERS_MIN, WORKERS_MAX),
            });
        }

        // 迭代上限验证
        if self.gram_max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                key: "gram_max_iterations".to_string(),
                value: "0".to_string(),
                reason: "迭代上限必须为正".to_string(),
            });
        }

        // 位宽偏低时二分可能停在未收敛状态，由调用方决定是否提高位宽重试
        if self.gram_accuracy.required_bits() >= self.precision.bits() {
            log::warn!(
                "{} 可能不足以达到 Gram 精度 {}，二分将返回未收敛诊断",
                self.precision,
                self.gram_accuracy
            );
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// 按配置的位宽建立精度上下文
    pub fn build_context(&self) -> PrecisionContext {
        PrecisionContext::with_precision(self.precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.precision.bits(), 256);
        assert_eq!(config.workers, 1);
        assert_eq!(config.gram_max_iterations, 1000);
    }

    #[test]
    fn test_invalid_workers() {
        let mut config = SessionConfig::default();
        config.workers = 0;
        assert!(config.validate().is_err());
        config.workers = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_iterations() {
        let mut config = SessionConfig::default();
        config.gram_max_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_low_precision_with_high_accuracy_is_valid() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "precision": 64, "gram_accuracy": 20 }"#).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.build_context().bits(), 64);
    }

    #[test]
    fn test_invalid_precision_rejected_on_parse() {
        let parsed: Result<SessionConfig, _> = serde_json::from_str(r#"{ "precision": 16 }"#);
        assert!(parsed.is_err());
        let parsed: Result<SessionConfig, _> = serde_json::from_str(r#"{ "gram_accuracy": 40 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = SessionConfig {
            workers: 4,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let config = SessionConfig {
            precision: Precision::new(512).unwrap(),
            workers: 8,
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();
        let loaded = SessionConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.build_context().bits(), 512);
    }

    #[test]
    fn test_missing_file() {
        let err = SessionConfig::from_file("/nonexistent/session.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
