use tracing::{debug, trace, warn};

use crate::error::{SplitError, codes};
use crate::lines::{EMPTY_LINE_PLACEHOLDER, LabelLine, LabelLines};

const NEWLINE: u8 = b'\n';
const TERMINATOR: u8 = 0;

/// 输入以换行结尾时，末尾空段的处理策略。
///
/// # 教案式说明
/// - **意图 (Why)**：中间的空段会被替换为占位空格，而末尾空段被直接丢弃，两者并不对称；
///   这种不对称更像疏漏而非刻意设计，但现有标签文本依赖它（例如 `"a\n"` 只渲染一行），因此默认保留；
/// - **契约 (What)**：[`TrailingEmpty::Omit`] 为默认值；[`TrailingEmpty::Placeholder`] 让末尾空段与中间空段一致；
/// - **设计权衡 (Trade-offs)**：以显式策略暴露差异，而不是悄悄“修复”，避免改变既有标签的行数。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TrailingEmpty {
    /// 丢弃末尾空段。
    #[default]
    Omit,
    /// 末尾空段同样输出一行占位空格。
    Placeholder,
}

/// 行内容的 UTF-8 校验策略。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Utf8Policy {
    /// 非法序列返回 [`SplitError::InvalidUtf8`]。
    #[default]
    Strict,
    /// 非法序列替换为 U+FFFD。
    Lossy,
}

/// 切分选项。
///
/// 默认值：不限槽位、丢弃末尾空段、严格 UTF-8。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct SplitOptions {
    max_slots: Option<usize>,
    trailing_empty: TrailingEmpty,
    encoding: Utf8Policy,
}

impl SplitOptions {
    /// 构造默认选项。
    pub const fn new() -> Self {
        Self {
            max_slots: None,
            trailing_empty: TrailingEmpty::Omit,
            encoding: Utf8Policy::Strict,
        }
    }

    /// 设置槽位上限（含终止槽位）；`None` 表示随行数增长。
    pub const fn with_max_slots(mut self, max_slots: Option<usize>) -> Self {
        self.max_slots = max_slots;
        self
    }

    /// 设置末尾空段策略。
    pub const fn with_trailing_empty(mut self, policy: TrailingEmpty) -> Self {
        self.trailing_empty = policy;
        self
    }

    /// 设置 UTF-8 校验策略。
    pub const fn with_encoding(mut self, policy: Utf8Policy) -> Self {
        self.encoding = policy;
        self
    }

    /// 槽位上限。
    pub const fn max_slots(&self) -> Option<usize> {
        self.max_slots
    }

    /// 末尾空段策略。
    pub const fn trailing_empty(&self) -> TrailingEmpty {
        self.trailing_empty
    }

    /// UTF-8 校验策略。
    pub const fn encoding(&self) -> Utf8Policy {
        self.encoding
    }
}

/// 标签文本切分器。
///
/// # 教案式说明
/// - **意图 (Why)**：多行标签逐行渲染，每一行都必须有可测量的宽度，因此空段以单个空格代替；
/// - **逻辑 (How)**：
///   1. 以首个 NUL 字节（若无则为切片末尾）作为终止位置；
///   2. 从左到右查找 `\n`，把两个边界之间的字节段复制为一行，空段输出占位空格；
///   3. 到达终止位置时，若仍有未输出的非空段则作为最后一行；
/// - **契约 (What)**：
///   - 切分器本身无状态，可在线程间共享；
///   - 每次调用产出新的行集合，或写入调用方独占的缓冲，不存在进程级共享状态；
///   - 失败时不返回部分结果。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LineSplitter {
    options: SplitOptions,
}

impl LineSplitter {
    /// 使用默认选项构造切分器。
    pub const fn new() -> Self {
        Self {
            options: SplitOptions::new(),
        }
    }

    /// 使用给定选项构造切分器。
    pub const fn with_options(options: SplitOptions) -> Self {
        Self { options }
    }

    /// 当前选项。
    pub const fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// 切分 `text`，返回新的行集合。
    pub fn split(&self, text: &[u8]) -> Result<LabelLines, SplitError> {
        let mut lines = Vec::new();
        self.split_into(text, &mut lines)?;
        Ok(LabelLines::from_vec(lines))
    }

    /// 切分 `text` 并写入 `out`，返回写入的行数。
    ///
    /// `out` 原有内容会先被清空，其已分配的容量得以复用；出错时 `out` 保持为空。
    pub fn split_into(&self, text: &[u8], out: &mut Vec<LabelLine>) -> Result<usize, SplitError> {
        out.clear();
        match self.scan(text, out) {
            Ok(consumed) => {
                debug!(lines = out.len(), consumed, "split label text into lines");
                Ok(out.len())
            }
            Err(err) => {
                out.clear();
                Err(err)
            }
        }
    }

    fn scan(&self, text: &[u8], out: &mut Vec<LabelLine>) -> Result<usize, SplitError> {
        let end = text
            .iter()
            .position(|byte| *byte == TERMINATOR)
            .unwrap_or(text.len());
        let body = &text[..end];

        // 终止标记同样占用一个槽位。
        if self.options.max_slots == Some(0) {
            return Err(self.too_many_lines(0));
        }

        let mut start = 0;
        while let Some(offset) = body[start..].iter().position(|byte| *byte == NEWLINE) {
            self.emit(&body[start..start + offset], out)?;
            start += offset + 1;
        }

        let tail = &body[start..];
        if !tail.is_empty() {
            self.emit(tail, out)?;
        } else if start > 0 && self.options.trailing_empty == TrailingEmpty::Placeholder {
            self.emit(tail, out)?;
        }

        Ok(end)
    }

    fn emit(&self, segment: &[u8], out: &mut Vec<LabelLine>) -> Result<(), SplitError> {
        if let Some(limit) = self.options.max_slots
            && out.len() + 2 > limit
        {
            return Err(self.too_many_lines(limit));
        }

        let index = out.len();
        let line = if segment.is_empty() {
            trace!(line = index, "empty segment replaced by placeholder");
            LabelLine::placeholder(copy_str(EMPTY_LINE_PLACEHOLDER)?)
        } else {
            LabelLine::from_segment(self.decode(index, segment)?)
        };

        out.try_reserve(1)
            .map_err(|_| SplitError::AllocationFailed {
                requested: core::mem::size_of::<LabelLine>(),
            })?;
        out.push(line);
        Ok(())
    }

    fn decode(&self, index: usize, segment: &[u8]) -> Result<String, SplitError> {
        match self.options.encoding {
            Utf8Policy::Strict => match core::str::from_utf8(segment) {
                Ok(text) => copy_str(text),
                Err(err) => {
                    warn!(
                        code = codes::INVALID_UTF8,
                        line = index,
                        valid_up_to = err.valid_up_to(),
                        "label line is not valid UTF-8"
                    );
                    Err(SplitError::InvalidUtf8 {
                        line: index,
                        valid_up_to: err.valid_up_to(),
                    })
                }
            },
            Utf8Policy::Lossy => copy_str(&String::from_utf8_lossy(segment)),
        }
    }

    fn too_many_lines(&self, limit: usize) -> SplitError {
        warn!(
            code = codes::TOO_MANY_LINES,
            limit, "label text exceeds the slot limit"
        );
        SplitError::TooManyLines { limit }
    }
}

/// 为一行申请恰好够用的存储并复制内容，分配失败以错误返回。
fn copy_str(text: &str) -> Result<String, SplitError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(text.len())
        .map_err(|_| SplitError::AllocationFailed {
            requested: text.len(),
        })?;
    owned.push_str(text);
    Ok(owned)
}
