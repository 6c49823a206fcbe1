//! Character classes shared by the reader and the parser.

/// Blanks that separate fields on a line.
pub const WHITESPACE: &str = " \t";
pub const DIGITS: &str = "0123456789";
/// Characters accepted between the parts of a date.
pub const DATE_SEPARATORS: &str = "/-.";

/// True for `_` and any Unicode letter.
pub fn is_alpha(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// True for the ASCII decimal digits only.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn in_set(c: char, set: &str) -> bool {
    set.contains(c)
}

#[test]
fn test_classes() {
    assert!(is_alpha('a'));
    assert!(is_alpha('_'));
    assert!(is_alpha('é'));
    assert!(!is_alpha('1'));
    assert!(!is_alpha(';'));

    assert!(is_digit('7'));
    assert!(!is_digit('٣'));

    assert!(in_set('\t', WHITESPACE));
    assert!(!in_set('\n', WHITESPACE));
    assert!(in_set('.', DATE_SEPARATORS));
}
