//! 切分结果容器。
//!
//! [`LabelLines`] 由调用方独占持有，析构时统一释放所有行字符串。

use core::fmt;
use core::ops::{Deref, Index};

/// 占位行内容：空段被渲染为单个空格，保证每一行都有可测量的宽度。
pub const EMPTY_LINE_PLACEHOLDER: &str = " ";

/// 一行文本的来源。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LineOrigin {
    /// 来自输入中的非空字节段。
    Text,
    /// 输入中的空段，内容为 [`EMPTY_LINE_PLACEHOLDER`]。
    EmptySegment,
}

/// 单行标签文本。
///
/// # 教案式说明
/// - **意图 (Why)**：占位空格与“用户真的写了一个空格”在内容上无法区分，
///   因此额外记录 [`LineOrigin`]，让 [`LabelLines::reconstruct`] 可以精确还原输入；
/// - **契约 (What)**：`as_str()` 永远不为空字符串；
/// - **设计权衡 (Trade-offs)**：每行多占一个字节的标记，换取无歧义的往返转换。
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LabelLine {
    text: String,
    origin: LineOrigin,
}

impl LabelLine {
    pub(crate) fn from_segment(text: String) -> Self {
        debug_assert!(!text.is_empty());
        Self {
            text,
            origin: LineOrigin::Text,
        }
    }

    pub(crate) fn placeholder(text: String) -> Self {
        Self {
            text,
            origin: LineOrigin::EmptySegment,
        }
    }

    /// 返回可渲染的行内容。
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 该行是否为空段的占位。
    pub fn is_placeholder(&self) -> bool {
        self.origin == LineOrigin::EmptySegment
    }

    /// 返回行来源。
    pub fn origin(&self) -> LineOrigin {
        self.origin
    }

    /// 取出内部字符串。
    pub fn into_string(self) -> String {
        self.text
    }

    /// 还原为输入中的原始段：占位行返回空串。
    pub fn source_segment(&self) -> &str {
        match self.origin {
            LineOrigin::Text => &self.text,
            LineOrigin::EmptySegment => "",
        }
    }
}

impl Deref for LabelLine {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for LabelLine {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for LabelLine {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for LabelLine {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for LabelLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// 一次切分产出的有序行集合。
///
/// # 教案式说明
/// - **意图 (Why)**：以每次调用新建、调用方独占的容器替代进程级静态数组，彻底消除重入与并发踩踏；
/// - **契约 (What)**：
///   - 行按输入顺序排列，集合末尾即“无更多行”的终止标记，不再需要显式的空指针槽位；
///   - 容器析构时释放所有行；
/// - **设计权衡 (Trade-offs)**：容器按需增长，不再有固定上限；需要上限的调用方通过
///   [`SplitOptions::max_slots`](crate::SplitOptions) 显式声明。
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct LabelLines {
    lines: Vec<LabelLine>,
}

impl LabelLines {
    pub(crate) fn from_vec(lines: Vec<LabelLine>) -> Self {
        Self { lines }
    }

    /// 行数，不含终止标记。
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// 输入为空时没有任何行。
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 按下标取行。
    pub fn get(&self, index: usize) -> Option<&LabelLine> {
        self.lines.get(index)
    }

    /// 按顺序遍历所有行；迭代结束即到达终止标记。
    pub fn iter(&self) -> core::slice::Iter<'_, LabelLine> {
        self.lines.iter()
    }

    /// 以切片形式借出所有行。
    pub fn as_slice(&self) -> &[LabelLine] {
        &self.lines
    }

    /// 转换为普通字符串列表，占位行保持为单个空格。
    pub fn into_strings(self) -> Vec<String> {
        self.lines.into_iter().map(LabelLine::into_string).collect()
    }

    /// 以 `\n` 重新拼接各行，占位行还原为空段。
    ///
    /// 对不以换行结尾的输入，结果与终止符之前的原文完全一致。
    pub fn reconstruct(&self) -> String {
        let mut out = String::new();
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(line.source_segment());
        }
        out
    }

    /// 返回字符数最多的一行，多行并列时取最先出现者。
    ///
    /// 标签排版以最长行确定宽度，因此这里按字符而非字节计数。
    pub fn widest(&self) -> Option<&LabelLine> {
        let mut widest: Option<(&LabelLine, usize)> = None;
        for line in &self.lines {
            let width = line.chars().count();
            match widest {
                Some((_, current)) if current >= width => {}
                _ => widest = Some((line, width)),
            }
        }
        widest.map(|(line, _)| line)
    }
}

impl Index<usize> for LabelLines {
    type Output = LabelLine;

    fn index(&self, index: usize) -> &LabelLine {
        &self.lines[index]
    }
}

impl IntoIterator for LabelLines {
    type Item = LabelLine;
    type IntoIter = std::vec::IntoIter<LabelLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelLines {
    type Item = &'a LabelLine;
    type IntoIter = core::slice::Iter<'a, LabelLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
