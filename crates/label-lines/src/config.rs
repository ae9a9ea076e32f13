//! 切分器配置。
//!
//! # 教案式说明
//! - **意图 (Why)**：标签渲染的槽位上限与末尾空段策略因宿主而异，以 TOML 文件声明，避免硬编码；
//! - **逻辑 (How)**：`serde` 派生反序列化，`toml::from_str` 解析文本，随后执行取值校验；
//! - **契约 (What)**：未知字段直接拒绝；缺省字段取 [`SplitOptions`] 的默认值；
//!   `max_slots = 0` 被拒绝，因为终止标记至少需要一个槽位。
//!
//! ```toml
//! max_slots = 512
//! trailing_empty = "omit"
//! encoding = "strict"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::codes;
use crate::splitter::{LineSplitter, SplitOptions, TrailingEmpty, Utf8Policy};
use crate::table::LineTable;

/// 配置加载错误。
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败。
    #[error("failed to read splitter config {path:?}: {source}")]
    Io {
        /// 配置文件路径。
        path: PathBuf,
        /// 底层 I/O 错误。
        #[source]
        source: std::io::Error,
    },
    /// 配置文本不是合法的 TOML，或字段类型不匹配。
    #[error("failed to parse splitter config: {0}")]
    Parse(#[from] toml::de::Error),
    /// 字段取值非法。
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// 出错的字段名。
        field: &'static str,
        /// 拒绝该取值的原因。
        reason: &'static str,
    },
}

impl ConfigError {
    /// 返回该错误对应的稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => codes::CONFIG_IO,
            ConfigError::Parse(_) => codes::CONFIG_PARSE,
            ConfigError::InvalidValue { .. } => codes::CONFIG_INVALID_VALUE,
        }
    }
}

/// 切分器的可序列化配置。
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitterConfig {
    /// 槽位上限（含终止槽位）；缺省表示不设上限。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_slots: Option<usize>,
    /// 末尾空段策略。
    pub trailing_empty: TrailingEmpty,
    /// UTF-8 校验策略。
    pub encoding: Utf8Policy,
}

impl SplitterConfig {
    /// 从 TOML 文本解析并校验配置。
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SplitterConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 读取并解析 `path` 指向的 TOML 配置文件。
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// 校验字段取值。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_slots == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_slots",
                reason: "at least one slot is required for the terminator",
            });
        }
        Ok(())
    }

    /// 转换为切分选项。
    pub fn options(&self) -> SplitOptions {
        SplitOptions::new()
            .with_max_slots(self.max_slots)
            .with_trailing_empty(self.trailing_empty)
            .with_encoding(self.encoding)
    }

    /// 按配置构造切分器。
    pub fn splitter(&self) -> LineSplitter {
        LineSplitter::from_config(self)
    }

    /// 按配置构造行表；未声明 `max_slots` 时使用默认槽位数。
    pub fn table(&self) -> LineTable {
        let slots = self
            .max_slots
            .unwrap_or(crate::table::LEGACY_SLOT_CAPACITY);
        LineTable::with_options(slots, self.options())
    }
}

impl From<&SplitterConfig> for SplitOptions {
    fn from(config: &SplitterConfig) -> Self {
        config.options()
    }
}

impl LineSplitter {
    /// 按配置构造切分器。
    pub fn from_config(config: &SplitterConfig) -> Self {
        LineSplitter::with_options(config.options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = SplitterConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, SplitterConfig::default());
        assert_eq!(config.options(), SplitOptions::new());
    }

    #[test]
    fn parses_all_fields() {
        let config = SplitterConfig::from_toml_str(
            r#"
            max_slots = 64
            trailing_empty = "placeholder"
            encoding = "lossy"
            "#,
        )
        .expect("config parses");
        assert_eq!(config.max_slots, Some(64));
        assert_eq!(config.trailing_empty, TrailingEmpty::Placeholder);
        assert_eq!(config.encoding, Utf8Policy::Lossy);

        let lines = config.splitter().split(b"a\n").expect("split succeeds");
        assert_eq!(lines.len(), 2);
        assert_eq!(config.table().slots(), 64);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SplitterConfig::from_toml_str("max_lines = 3").expect_err("unknown key");
        assert_eq!(err.code(), codes::CONFIG_PARSE);
    }

    #[test]
    fn rejects_zero_slots() {
        let err = SplitterConfig::from_toml_str("max_slots = 0").expect_err("zero slots");
        assert_eq!(err.code(), codes::CONFIG_INVALID_VALUE);
    }

    #[test]
    fn missing_file_reports_io() {
        let err = SplitterConfig::from_path("/nonexistent/label-lines.toml")
            .expect_err("missing file");
        assert_eq!(err.code(), codes::CONFIG_IO);
    }

    #[test]
    fn serializes_back_to_toml() {
        let config = SplitterConfig {
            max_slots: Some(512),
            trailing_empty: TrailingEmpty::Omit,
            encoding: Utf8Policy::Strict,
        };
        let raw = toml::to_string(&config).expect("serializes");
        assert!(raw.contains("max_slots = 512"));
        assert!(raw.contains("trailing_empty = \"omit\""));
    }
}
