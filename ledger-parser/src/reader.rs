//! Character-at-a-time input with one character of lookahead.

use std::iter::Fuse;

use ledger_core::Location;

use super::lexical::{in_set, is_alpha, is_digit};

/// Reads a character stream one character at a time, tracking positions.
///
/// Carriage returns are dropped. A newline moves the position to column 0 of the next
/// line and every other character moves it one column right, so the first character of a
/// line sits at column 1 and a newline carries the position of the line it starts.
///
/// The current character is `None` once the input is exhausted; every operation leaves the
/// reader in a valid state at that point.
#[derive(Debug)]
pub struct CharReader<I: Iterator<Item = char>> {
    source: Fuse<I>,

    current: Option<char>,
    location: Location,

    next: Option<char>,
    next_location: Location,
}

impl<'a> CharReader<std::str::Chars<'a>> {
    /// A reader over `input` whose first line is numbered `line`.
    pub fn from_text(input: &'a str, line: u64) -> Self {
        CharReader::new(input.chars(), line)
    }
}

impl<I: Iterator<Item = char>> CharReader<I> {
    /// A reader over `source` whose first line is numbered `line`, primed so that the
    /// current and lookahead characters are both valid.
    pub fn new(source: I, line: u64) -> Self {
        let start = Location::new(line, 0);
        let mut reader = CharReader {
            source: source.fuse(),
            current: None,
            location: start,
            next: None,
            next_location: start,
        };
        reader.read_next();
        reader.current = reader.next;
        reader.location = reader.next_location;
        reader.read_next();
        reader
    }

    fn read_next(&mut self) {
        self.next = self.source.by_ref().find(|&c| c != '\r');
        match self.next {
            Some('\n') => self.next_location = self.next_location.next_line(),
            Some(_) => self.next_location = self.next_location.next_column(),
            None => {}
        }
    }

    /// Moves the lookahead into the current position and reads one more character.
    pub fn advance(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.current = self.next;
        self.location = self.next_location;
        if self.current.is_some() {
            self.read_next();
        }
    }

    pub fn current(&self) -> Option<char> {
        self.current
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_eof(&self) -> bool {
        self.current.is_none()
    }

    pub fn peek(&self) -> Option<char> {
        self.next
    }

    pub fn next_location(&self) -> Location {
        self.next_location
    }

    pub fn is_next_eof(&self) -> bool {
        self.next.is_none()
    }

    /// True if the current character is `c`.
    pub fn at(&self, c: char) -> bool {
        self.current == Some(c)
    }

    /// True if the current character is one of `set`.
    pub fn matches(&self, set: &str) -> bool {
        self.current.map_or(false, |c| in_set(c, set))
    }

    /// True if the lookahead character is one of `set`.
    pub fn next_matches(&self, set: &str) -> bool {
        self.next.map_or(false, |c| in_set(c, set))
    }

    pub fn matches_alpha(&self) -> bool {
        self.current.map_or(false, is_alpha)
    }

    pub fn matches_digit(&self) -> bool {
        self.current.map_or(false, is_digit)
    }

    /// Skips characters while they are in `set`.
    pub fn eat(&mut self, set: &str) {
        while self.matches(set) {
            self.advance();
        }
    }

    /// Skips characters until one in `set` (or the end of input) is reached.
    pub fn eat_until(&mut self, set: &str) {
        while !self.is_eof() && !self.matches(set) {
            self.advance();
        }
    }

    /// Appends characters to `buf` while they are in `set`.
    pub fn read_while(&mut self, set: &str, buf: &mut String) {
        while let Some(c) = self.current.filter(|&c| in_set(c, set)) {
            buf.push(c);
            self.advance();
        }
    }

    /// Like [`read_while`](Self::read_while), but reads at most `limit` characters. Returns
    /// true if reading stopped because the limit was reached.
    pub fn read_while_limit(&mut self, set: &str, buf: &mut String, limit: usize) -> bool {
        for _ in 0..limit {
            match self.current.filter(|&c| in_set(c, set)) {
                Some(c) => {
                    buf.push(c);
                    self.advance();
                }
                None => return false,
            }
        }
        true
    }

    /// Appends characters to `buf` until one in `set` (or the end of input) is reached.
    pub fn read_until(&mut self, set: &str, buf: &mut String) {
        while let Some(c) = self.current.filter(|&c| !in_set(c, set)) {
            buf.push(c);
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(input: &str) -> Vec<(char, u64, u16)> {
        let mut reader = CharReader::from_text(input, 1);
        let mut out = Vec::new();
        while let Some(c) = reader.current() {
            out.push((c, reader.location().line(), reader.location().column()));
            reader.advance();
        }
        out
    }

    #[test]
    fn tracks_lines_and_columns() {
        assert_eq!(
            positions("ab\r\nc\n"),
            vec![('a', 1, 1), ('b', 1, 2), ('\n', 2, 0), ('c', 2, 1), ('\n', 3, 0)]
        );
    }

    #[test]
    fn lookahead() {
        let mut reader = CharReader::from_text("xy", 5);
        assert_eq!(reader.current(), Some('x'));
        assert_eq!(reader.peek(), Some('y'));
        assert_eq!(reader.next_location(), Location::new(5, 2));
        assert!(!reader.is_next_eof());

        reader.advance();
        assert_eq!(reader.current(), Some('y'));
        assert!(reader.is_next_eof());

        reader.advance();
        assert!(reader.is_eof());
        reader.advance();
        assert!(reader.is_eof());
        assert_eq!(reader.location(), Location::new(5, 2));
    }

    #[test]
    fn empty_input() {
        let reader = CharReader::from_text("", 1);
        assert!(reader.is_eof());
        assert!(reader.is_next_eof());
        assert!(!reader.matches(" \t"));
        assert!(!reader.matches_alpha());
    }

    #[test]
    fn carriage_returns_never_surface() {
        let mut reader = CharReader::from_text("\r\r\ra\r", 1);
        assert_eq!(reader.current(), Some('a'));
        assert!(reader.is_next_eof());
        reader.advance();
        assert!(reader.is_eof());
    }

    #[test]
    fn reading_helpers() {
        let mut reader = CharReader::from_text("  \t2021/ab;rest", 1);
        reader.eat(" \t");
        assert!(reader.matches_digit());

        let mut buf = String::new();
        assert!(reader.read_while_limit("0123456789", &mut buf, 3));
        assert_eq!(buf, "202");
        assert!(!reader.read_while_limit("0123456789", &mut buf, 3));
        assert_eq!(buf, "2021");
        assert!(reader.at('/'));
        reader.advance();

        buf.clear();
        reader.read_until(";", &mut buf);
        assert_eq!(buf, "ab");
        assert!(reader.at(';'));
        assert!(reader.next_matches("r"));

        reader.eat_until("\n");
        assert!(reader.is_eof());
        buf.clear();
        reader.read_while("abc", &mut buf);
        reader.read_until("x", &mut buf);
        assert!(buf.is_empty());
    }
}
