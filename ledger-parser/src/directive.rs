use log::trace;

use ledger_core::Directive;

use super::lexical::WHITESPACE;
use super::reader::CharReader;

/// Reads a directive: the keyword, the rest of its line as the argument, and every
/// following indented line, trimmed.
///
/// `anchor` is the number of transactions read so far. A blank line ends the directive.
pub fn directive<I: Iterator<Item = char>>(cr: &mut CharReader<I>, anchor: usize) -> Directive {
    let location = cr.location();

    let mut keyword = String::new();
    cr.read_until(" \t\n", &mut keyword);
    let mut argument = String::new();
    cr.read_until("\n", &mut argument);
    cr.advance();

    let mut lines = Vec::new();
    while cr.matches(WHITESPACE) {
        cr.eat(WHITESPACE);
        if cr.is_eof() || cr.at('\n') {
            break;
        }
        let mut line = String::new();
        cr.read_until("\n", &mut line);
        cr.advance();
        lines.push(line.trim_end().to_string());
    }

    trace!("{} directive on line {}", keyword, location.line());
    Directive {
        keyword,
        argument: argument.trim().to_string(),
        lines,
        anchor,
        location,
    }
}
