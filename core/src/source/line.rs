use core::ops::Range;
use std::collections::BTreeMap;

use memchr::memchr_iter;

use super::{Location, Span};
use crate::contract::{contract_assert, contract_violation};

/// One physical line of source text.
///
/// A line covers the bytes from its starting offset up to, but not
/// including, its terminator. While a streaming lexer is still inside a
/// line its end is unknown; see [`LineMap::start_line`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    number: usize,
    offset: usize,
    end: Option<usize>,
}

impl Line {
    pub(crate) fn new(number: usize, offset: usize, end: Option<usize>) -> Self {
        Self {
            number,
            offset,
            end,
        }
    }

    /// 1-based line number.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    /// Offset of the first byte of the line.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Offset of the terminator, once the line is finished.
    #[inline]
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }

    /// Byte range of the line's text. An unfinished line is empty.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end.unwrap_or(self.offset)
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::from(self.range())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.range().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Terminate the line at `end`.
    #[track_caller]
    pub fn finish(&mut self, end: usize) {
        contract_assert!(
            end >= self.offset,
            "line {} cannot end at {} before its start {}",
            self.number,
            end,
            self.offset
        );
        self.end = Some(end);
    }
}

/// Ordered index from starting offset to [`Line`].
///
/// Keys are strictly increasing. Any offset resolves to the line with the
/// largest starting offset not greater than it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap {
    lines: BTreeMap<usize, Line>,
}

impl LineMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `text` in a single pass. Every `\n` closes a line, and a final
    /// line is always recorded for whatever follows the last terminator,
    /// even when that is nothing.
    pub fn scan(text: &str) -> Self {
        let mut map = Self::new();
        let mut pos = 0;
        for nl in memchr_iter(b'\n', text.as_bytes()) {
            map.start_line(pos).finish(nl);
            pos = nl + 1;
        }
        map.start_line(pos).finish(text.len());
        log::debug!("indexed {} lines over {} bytes", map.len(), text.len());
        map
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Begin tracking a line at `offset` before its terminator is known.
    ///
    /// The new line is numbered after every line already recorded. If a line
    /// already starts at `offset` it is returned unchanged.
    pub fn start_line(&mut self, offset: usize) -> &mut Line {
        let number = self.lines.len() + 1;
        self.lines
            .entry(offset)
            .or_insert_with(|| Line::new(number, offset, None))
    }

    /// Terminate the line starting at `offset`.
    #[track_caller]
    pub fn finish_line(&mut self, offset: usize, end: usize) {
        match self.lines.get_mut(&offset) {
            Some(line) => line.finish(end),
            None => contract_violation!("no line starts at offset {}", offset),
        }
    }

    /// The line containing `loc`, if the map has any lines.
    ///
    /// A location ahead of the first recorded line resolves to that line.
    pub fn get(&self, loc: Location) -> Option<&Line> {
        let offset = loc.get()?;
        self.lines
            .range(..=offset)
            .next_back()
            .or_else(|| self.lines.iter().next())
            .map(|(_, line)| line)
    }

    /// 1-based byte column of `loc` within its line, if `loc` resolves to
    /// a line.
    pub fn column_of(&self, loc: Location) -> Option<usize> {
        self.get(loc).map(|line| column_in(line, loc))
    }

    /// The line containing `loc`.
    ///
    /// Panics if the map is empty or `loc` is [`Location::NONE`].
    #[track_caller]
    pub fn line(&self, loc: Location) -> &Line {
        contract_assert!(!self.is_empty(), "line lookup in an empty line map");
        match self.get(loc) {
            Some(line) => line,
            None => contract_violation!("line lookup for an unknown location"),
        }
    }

    #[track_caller]
    pub fn line_no(&self, loc: Location) -> usize {
        self.line(loc).number()
    }

    /// 1-based byte column of `loc` within its line.
    #[track_caller]
    pub fn column_no(&self, loc: Location) -> usize {
        column_in(self.line(loc), loc)
    }

    /// Lines in offset order.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }
}

fn column_in(line: &Line, loc: Location) -> usize {
    loc.offset().saturating_sub(line.offset()) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn scan_records_every_line() {
        let map = LineMap::scan("ab\ncde\nf");
        let lines: Vec<_> = map.iter().map(|l| (l.number(), l.range())).collect();
        assert_eq!(lines, vec![(1, 0..2), (2, 3..6), (3, 7..8)]);
    }

    #[test]
    fn trailing_terminator_leaves_empty_last_line() {
        let map = LineMap::scan("a\n");
        assert_eq!(map.len(), 2);
        let last = map.line(Location::new(2));
        assert_eq!(last.number(), 2);
        assert!(last.is_empty());
    }

    #[test]
    fn empty_text_has_one_line() {
        let map = LineMap::scan("");
        assert_eq!(map.len(), 1);
        assert_eq!(map.line_no(Location::new(0)), 1);
        assert_eq!(map.column_no(Location::new(0)), 1);
    }

    #[test_case(0, 1, 1; "start of first line")]
    #[test_case(2, 1, 3; "terminator of first line")]
    #[test_case(3, 2, 1; "start of second line")]
    #[test_case(5, 2, 3; "end of second line")]
    #[test_case(7, 3, 1; "unterminated last line")]
    #[test_case(8, 3, 2; "end of text")]
    fn line_and_column(offset: usize, line: usize, column: usize) {
        let map = LineMap::scan("ab\ncde\nf");
        assert_eq!(map.line_no(Location::new(offset)), line);
        assert_eq!(map.column_no(Location::new(offset)), column);
    }

    #[test_case(Location::new(0), Some(1); "start of text")]
    #[test_case(Location::new(6), Some(4); "end of second line")]
    #[test_case(Location::new(40), Some(34); "past the end")]
    #[test_case(Location::NONE, None; "unknown location")]
    fn column_of_never_panics(loc: Location, column: Option<usize>) {
        let map = LineMap::scan("ab\ncde\nf");
        assert_eq!(map.column_of(loc), column);
        assert_eq!(LineMap::new().column_of(loc), None);
    }

    #[test]
    fn streaming_construction() {
        let mut map = LineMap::new();
        map.start_line(0);
        assert!(!map.line(Location::new(0)).is_finished());
        map.finish_line(0, 4);
        map.start_line(5).finish(6);

        assert_eq!(map.line_no(Location::new(5)), 2);
        assert_eq!(map.line(Location::new(2)).range(), 0..4);
    }

    #[test]
    fn restarting_a_line_keeps_it() {
        let mut map = LineMap::new();
        map.start_line(0).finish(3);
        let again = map.start_line(0);
        assert_eq!(again.number(), 1);
        assert_eq!(again.end(), Some(3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn location_before_first_line() {
        let mut map = LineMap::new();
        map.start_line(10).finish(12);
        assert_eq!(map.line_no(Location::new(3)), 1);
    }

    #[test]
    fn get_is_none_for_empty_map_and_unknown_location() {
        assert!(LineMap::new().get(Location::new(0)).is_none());
        assert!(LineMap::scan("x").get(Location::NONE).is_none());
    }

    #[test]
    #[should_panic(expected = "empty line map")]
    fn lookup_in_empty_map_is_a_contract_violation() {
        LineMap::new().line(Location::new(0));
    }

    #[test]
    #[should_panic(expected = "no line starts at offset 4")]
    fn finishing_an_untracked_line_is_a_contract_violation() {
        LineMap::new().finish_line(4, 9);
    }
}
