//! 可复用的定长行表。
//!
//! 渲染循环每帧都要切分标签文本，[`LineTable`] 让调用方复用同一块行缓冲：
//! 每次 [`LineTable::fill`] 覆盖上一次的内容，槽位数固定，终止标记占一个槽位。
//! 行表由调用方持有并通过 `&mut` 写入，重入或并发填充在编译期即被拒绝。

use crate::error::SplitError;
use crate::lines::LabelLine;
use crate::splitter::{LineSplitter, SplitOptions};

/// 默认槽位数，含终止槽位，即最多 511 行。
pub const LEGACY_SLOT_CAPACITY: usize = 512;

/// 定长、可复用的行表。
///
/// # 教案式说明
/// - **意图 (Why)**：保留“固定槽位 + 每次覆盖”的使用方式，同时把越界写改为
///   [`SplitError::TooManyLines`]，把进程级静态数组改为调用方独占的值；
/// - **契约 (What)**：
///   - `fill` 成功后 [`lines`](Self::lines) 只包含本次结果；
///   - `fill` 失败后行表为空，不会残留上一次或半成品的行；
///   - 槽位数至少为 1，供终止标记使用；
/// - **设计权衡 (Trade-offs)**：首次填充后缓冲容量被保留，后续填充不再为行指针数组重新分配；
///   行字符串本身仍按行分配，与结果容器 [`LabelLines`](crate::LabelLines) 一致。
#[derive(Debug)]
pub struct LineTable {
    splitter: LineSplitter,
    slots: usize,
    lines: Vec<LabelLine>,
}

impl LineTable {
    /// 构造默认槽位数（[`LEGACY_SLOT_CAPACITY`]）的行表。
    pub fn new() -> Self {
        Self::with_slots(LEGACY_SLOT_CAPACITY)
    }

    /// 构造 `slots` 个槽位的行表，`slots` 小于 1 时按 1 处理。
    pub fn with_slots(slots: usize) -> Self {
        Self::with_options(slots, SplitOptions::new())
    }

    /// 使用给定切分选项构造行表；选项中的槽位上限与 `slots` 取较小者。
    pub fn with_options(slots: usize, options: SplitOptions) -> Self {
        let slots = slots.max(1);
        let effective = match options.max_slots() {
            Some(limit) => limit.min(slots),
            None => slots,
        };
        Self {
            splitter: LineSplitter::with_options(options.with_max_slots(Some(effective))),
            slots: effective,
            lines: Vec::new(),
        }
    }

    /// 切分 `text` 并覆盖行表内容，返回本次的行。
    pub fn fill(&mut self, text: &[u8]) -> Result<&[LabelLine], SplitError> {
        self.splitter.split_into(text, &mut self.lines)?;
        Ok(&self.lines)
    }

    /// 上一次成功填充的行。
    pub fn lines(&self) -> &[LabelLine] {
        &self.lines
    }

    /// 当前行数。
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// 行表是否为空。
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 实际生效的槽位总数，含终止槽位，即最多容纳 `slots() - 1` 行。
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// 释放所有行，保留缓冲容量。
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for LineTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> String {
        (0..count)
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn fill_overwrites_previous_contents() {
        let mut table = LineTable::new();
        assert_eq!(table.fill(b"a\nb\nc").expect("fits").len(), 3);
        let second = table.fill(b"z").expect("fits");
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].as_str(), "z");
    }

    #[test]
    fn legacy_capacity_holds_511_lines() {
        let mut table = LineTable::new();
        let text = numbered(LEGACY_SLOT_CAPACITY - 1);
        assert_eq!(table.fill(text.as_bytes()).expect("fits").len(), 511);
    }

    #[test]
    fn overflow_is_reported_and_leaves_table_empty() {
        let mut table = LineTable::new();
        table.fill(b"previous").expect("fits");
        let text = numbered(LEGACY_SLOT_CAPACITY);
        let err = table.fill(text.as_bytes()).expect_err("512 lines overflow");
        assert_eq!(err, SplitError::TooManyLines { limit: 512 });
        assert!(table.is_empty());
    }

    #[test]
    fn empty_input_never_exposes_stale_lines() {
        let mut table = LineTable::with_slots(4);
        table.fill(b"stale").expect("fits");
        assert!(table.fill(b"").expect("empty fits").is_empty());
        assert!(table.lines().is_empty());
    }

    #[test]
    fn slots_clamped_to_terminator() {
        let mut table = LineTable::with_slots(0);
        assert_eq!(table.slots(), 1);
        assert!(table.fill(b"").expect("terminator fits").is_empty());
        assert!(table.fill(b"x").is_err());
    }

    #[test]
    fn looser_option_limit_keeps_table_slots() {
        let table = LineTable::with_options(4, SplitOptions::new().with_max_slots(Some(64)));
        assert_eq!(table.slots(), 4);
    }

    #[test]
    fn reported_slots_match_fill_capacity() {
        for (slots, option) in [(16, Some(2)), (3, None), (8, Some(8)), (0, Some(5))] {
            let mut table =
                LineTable::with_options(slots, SplitOptions::new().with_max_slots(option));
            let fits = numbered(table.slots() - 1);
            assert!(table.fill(fits.as_bytes()).is_ok());
            let overflow = numbered(table.slots());
            assert!(table.fill(overflow.as_bytes()).is_err());
        }
    }

    #[test]
    fn tighter_option_limit_wins() {
        let mut table = LineTable::with_options(16, SplitOptions::new().with_max_slots(Some(2)));
        assert_eq!(table.slots(), 2);
        let err = table.fill(b"a\nb").expect_err("two lines need three slots");
        assert_eq!(
            err,
            SplitError::TooManyLines {
                limit: table.slots()
            }
        );
        table.fill(b"a").expect("fits");
        table.clear();
        assert_eq!(table.len(), 0);
    }
}
