//! Source code span and line tracking.
//! 源码范围和行号跟踪。

use std::fmt;

/// A span representing a byte range in source code, tagged with the
/// 1-based line it starts on.
/// 表示源码中一个字节范围的 Span，并记录起始行号。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start offset. / 起始偏移。
    pub start: u32,
    /// End offset (exclusive). / 结束偏移（不包含）。
    pub end: u32,
    /// Line of `start`. / `start` 所在的行。
    pub line: u32,
}

impl Span {
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
    };

    /// Offsets past `u32::MAX` saturate.
    pub fn new(start: usize, end: usize, line: u32) -> Self {
        Span {
            start: u32::try_from(start).unwrap_or(u32::MAX),
            end: u32::try_from(end).unwrap_or(u32::MAX),
            line,
        }
    }

    /// A zero-width span at `offset`.
    /// 位于 `offset` 的零宽度范围。
    pub fn point(offset: usize, line: u32) -> Self {
        Self::new(offset, offset, line)
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// Returns true if this span has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the byte range for this span.
    /// 返回此范围对应的字节区间。
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}@{}", self.start, self.end, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_offsets() {
        let span = Span::new(2, 14, 1);
        assert_eq!(span.range(), 2..14);
        assert_eq!(span.len(), 12);
        assert_eq!(span.line, 1);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_new_saturates_huge_offsets() {
        let past = u32::MAX as usize + 5;
        let span = Span::new(past, usize::MAX, 9);
        assert_eq!(span.start, u32::MAX);
        assert_eq!(span.end, u32::MAX);
        assert!(span.is_empty());

        let span = Span::new(3, past, 9);
        assert_eq!(span.start, 3);
        assert_eq!(span.end, u32::MAX);
    }

    #[test]
    fn test_point_is_empty() {
        let span = Span::point(7, 2);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }
}
