//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中声明行切分可能出现的全部失败：容量超限、分配失败、非法 UTF-8；
//! - 定长静态数组方案对这些情况要么假设不会发生，要么直接越界写入；这里统一改为可恢复的错误值。
//!
//! ## 设计要求（What）
//! - 所有错误类型派生 `thiserror::Error`，可直接交给 `anyhow` 等上层框架；
//! - 每个变体都映射到 [`codes`] 中的稳定错误码，便于日志聚合与告警。

use thiserror::Error;

/// 行切分与配置加载使用的稳定错误码。
///
/// 错误码遵循 `<领域>.<语义>` 命名约定，与日志字段 `code` 保持一致。
pub mod codes {
    /// 行数（含终止槽位）超过配置的槽位上限。
    pub const TOO_MANY_LINES: &str = "label.too_many_lines";
    /// 为单行文本申请存储失败。
    pub const ALLOC_FAILED: &str = "label.alloc_failed";
    /// 行内容不是合法的 UTF-8。
    pub const INVALID_UTF8: &str = "label.invalid_utf8";
    /// 配置文件读取失败。
    pub const CONFIG_IO: &str = "config.io";
    /// 配置文本无法解析为 TOML 或字段类型不匹配。
    pub const CONFIG_PARSE: &str = "config.parse";
    /// 配置字段取值非法。
    pub const CONFIG_INVALID_VALUE: &str = "config.invalid_value";
}

/// 行切分错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：把越界写、空指针这类未定义行为全部转成显式返回值，调用方可据此降级渲染；
/// - **契约 (What)**：
///   - 变体均为 `Send + Sync + 'static`，可安全跨线程传播；
///   - 错误发生时不会留下半成品结果，切分结果容器与 [`LineTable`](crate::LineTable) 都保持为空；
/// - **设计权衡 (Trade-offs)**：只保存数值上下文而不保存原始文本，避免错误对象意外持有大块标签内容。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SplitError {
    /// 行数加上终止槽位超过了 `limit`。
    ///
    /// - **契约 (What)**：`limit` 为配置的槽位总数，其中一个槽位留给终止标记，因此最多容纳 `limit - 1` 行。
    #[error("label text needs more than {limit} slots (including the terminator)")]
    TooManyLines {
        /// 槽位总数，含终止槽位。
        limit: usize,
    },

    /// 为某一行申请 `requested` 字节存储失败。
    #[error("failed to allocate {requested} bytes for a label line")]
    AllocationFailed {
        /// 申请的字节数。
        requested: usize,
    },

    /// 第 `line` 行（从 0 开始）在第 `valid_up_to` 字节之后出现非法 UTF-8 序列。
    #[error("label line {line} is not valid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 {
        /// 出错行的下标，从 0 开始。
        line: usize,
        /// 该行内合法 UTF-8 前缀的字节长度。
        valid_up_to: usize,
    },
}

impl SplitError {
    /// 返回该错误对应的稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            SplitError::TooManyLines { .. } => codes::TOO_MANY_LINES,
            SplitError::AllocationFailed { .. } => codes::ALLOC_FAILED,
            SplitError::InvalidUtf8 { .. } => codes::INVALID_UTF8,
        }
    }
}
