#![warn(missing_docs)]

//! `label-lines` 把以 NUL 结尾的标签文本按 `\n` 切分为可逐行渲染的行集合。
//!
//! # 背景（Why）
//! - GUI 客户端以多行标签展示城市名、单位说明等文本，每一行单独排版；
//! - 空行若以空字符串表示会得到零宽度的行，排版时高度塌陷，因此空段统一替换为单个空格；
//! - 进程级的定长静态数组既不可重入也无法检查越界，因此结果容器由调用方独占；
//!   需要固定槽位时以 [`LineTable`] 显式声明，越界以错误返回。
//!
//! # 使用概览（How）
//! - 一次性切分：[`split_lines`]、[`split_str`]、[`split_c_str`]，返回 [`LabelLines`]；
//! - 自定义行为：[`LineSplitter`] + [`SplitOptions`]（槽位上限、末尾空段策略、UTF-8 策略）；
//! - 渲染循环中复用缓冲：[`LineTable::fill`]；
//! - 启用 `config` 特性（默认开启）后可从 TOML 加载 [`SplitterConfig`]。
//!
//! # 契约（What）
//! - 输入在首个 NUL 字节处终止，没有 NUL 时以切片末尾为终止；
//! - 中间与开头的空段输出为 `" "`，输入以 `\n` 结尾时默认不额外输出空行（见 [`TrailingEmpty`]）；
//! - 空输入得到零行；
//! - 所有失败（槽位超限、分配失败、非法 UTF-8）以 [`SplitError`] 返回，不会 panic；
//! - 逐字节复制的 C 版本对内容从不报错，而行在这里是 `String`，因此默认的
//!   [`Utf8Policy::Strict`] 会让非法 UTF-8 返回 [`SplitError::InvalidUtf8`]，这是新增的错误类别；
//!   需要“内容永不失败”的调用方选用 [`Utf8Policy::Lossy`]，非法序列替换为 U+FFFD。
//!
//! ```
//! let lines = label_lines::split_str("Paris\n\nsize 8").unwrap();
//! assert_eq!(lines.into_strings(), vec!["Paris", " ", "size 8"]);
//! ```

use std::ffi::CStr;

#[cfg(feature = "config")]
mod config;
mod error;
mod lines;
mod splitter;
mod table;

#[cfg(feature = "config")]
pub use crate::config::{ConfigError, SplitterConfig};
pub use crate::error::{SplitError, codes};
pub use crate::lines::{EMPTY_LINE_PLACEHOLDER, LabelLine, LabelLines, LineOrigin};
pub use crate::splitter::{LineSplitter, SplitOptions, TrailingEmpty, Utf8Policy};
pub use crate::table::{LEGACY_SLOT_CAPACITY, LineTable};

/// 以默认选项切分字节文本。
pub fn split_lines(text: &[u8]) -> Result<LabelLines, SplitError> {
    LineSplitter::new().split(text)
}

/// 以默认选项切分 UTF-8 文本；文本中的 NUL 同样视为终止符。
pub fn split_str(text: &str) -> Result<LabelLines, SplitError> {
    split_lines(text.as_bytes())
}

/// 以默认选项切分 C 字符串。
pub fn split_c_str(text: &CStr) -> Result<LabelLines, SplitError> {
    split_lines(text.to_bytes())
}
