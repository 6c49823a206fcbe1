//! Parser for plain-text ledger files.
//!
//! ```
//! let file = ledger_parser::parse(
//!     "2021/09/29 * Gas\n\tExpenses:Car:Gas  $16.00\n\tLiabilities:CreditCard\n",
//! )
//! .unwrap();
//! assert_eq!(file.transactions()[0].postings.len(), 2);
//! ```

use std::io::Read;

use log::debug;

use ledger_core::{File, Location};

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use reader::CharReader;

mod amount;
mod date;
mod directive;
pub mod error;
pub mod lexical;
pub mod reader;
mod transaction;

/// Parses a complete ledger file.
pub fn parse(input: &str) -> ParseResult<File> {
    parse_with_line(input, 1)
}

/// Like [`parse`], numbering the first line of `input` as `line`.
pub fn parse_with_line(input: &str, line: u64) -> ParseResult<File> {
    parse_chars(input.chars(), line)
}

/// Parses ledger text from any character source.
pub fn parse_chars<I: Iterator<Item = char>>(chars: I, line: u64) -> ParseResult<File> {
    parse_file(&mut CharReader::new(chars, line))
}

/// Reads all of `reader` as UTF-8 and parses it.
pub fn parse_reader<R: Read>(mut reader: R) -> ParseResult<File> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|err| ParseError::io(err, Location::new(1, 0)))?;
    parse(&input)
}

/// Parses everything left in `cr`.
///
/// Blank lines and lines starting with `;` are skipped. A line starting with a letter or
/// `_` is a directive; anything else must be a transaction.
pub fn parse_file<I: Iterator<Item = char>>(cr: &mut CharReader<I>) -> ParseResult<File> {
    let mut transactions = Vec::new();
    let mut directives = Vec::new();

    loop {
        cr.eat(lexical::WHITESPACE);
        match cr.current() {
            None => break,
            Some('\n') => cr.advance(),
            Some(';') => {
                cr.eat_until("\n");
                cr.advance();
            }
            Some(c) if lexical::is_alpha(c) => {
                directives.push(directive::directive(cr, transactions.len()));
            }
            Some(_) => transactions.push(transaction::transaction(cr)?),
        }
    }

    debug!(
        "parsed {} transactions and {} directives",
        transactions.len(),
        directives.len()
    );
    Ok(File::new(transactions, directives))
}
