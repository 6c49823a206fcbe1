use std::fmt;

/// A line and column position in ledger source text.
///
/// Lines are limited to 48 bits and columns to 16 bits; moving past either
/// bound saturates instead of wrapping.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Location {
    line: u64,
    column: u16,
}

impl Location {
    /// The largest representable line number.
    pub const MAX_LINE: u64 = (1 << 48) - 1;

    pub fn new(line: u64, column: u16) -> Self {
        Location {
            line: line.min(Self::MAX_LINE),
            column,
        }
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn column(&self) -> u16 {
        self.column
    }

    /// Position of the first column on the following line.
    pub fn next_line(self) -> Self {
        Location::new(self.line.saturating_add(1), 0)
    }

    /// Position one column to the right.
    pub fn next_column(self) -> Self {
        Location {
            line: self.line,
            column: self.column.saturating_add(1),
        }
    }

    /// The same column, `n` lines further down.
    pub fn lines_after(self, n: u64) -> Self {
        Location::new(self.line.saturating_add(n), self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing() {
        let loc = Location::new(3, 7);
        assert_eq!(loc.next_column(), Location::new(3, 8));
        assert_eq!(loc.next_line(), Location::new(4, 0));
        assert_eq!(loc.lines_after(2), Location::new(5, 7));
        assert_eq!(loc.to_string(), "3:7");
    }

    #[test]
    fn saturates_at_bounds() {
        let loc = Location::new(u64::MAX, u16::MAX);
        assert_eq!(loc.line(), Location::MAX_LINE);
        assert_eq!(loc.next_line().line(), Location::MAX_LINE);
        assert_eq!(loc.next_column().column(), u16::MAX);
    }
}
