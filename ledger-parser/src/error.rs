use std::error::Error;
use std::fmt;

use ledger_core::Location;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// A transaction date is malformed or names a day that does not exist.
    BadDate,
    /// An amount is malformed or out of the representable range.
    BadAmount,
    /// The input ended in the middle of a construct.
    UnexpectedEnd,
    /// A transaction violates the structure of the format, e.g. an empty account name.
    MalformedTransaction,
    /// A tag line contains something besides tags.
    MalformedTagLine,
    /// The underlying reader failed.
    Io,
}

#[derive(Debug)]
pub struct ParseError {
    /// The type of error.
    pub kind: ParseErrorKind,
    /// Where in the input the error was found.
    pub location: Location,
    source: Option<Box<dyn Error + 'static + Send + Sync>>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.kind {
            ParseErrorKind::BadDate => "Malformed transaction date",
            ParseErrorKind::BadAmount => "Malformed or out of range amount",
            ParseErrorKind::UnexpectedEnd => "Unexpected end of input",
            ParseErrorKind::MalformedTransaction => "Malformed transaction",
            ParseErrorKind::MalformedTagLine => "Malformed tags in transaction",
            ParseErrorKind::Io => "Error reading input",
        };
        write!(f, "{} on line {}", message, self.location.line())?;
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, location: Location) -> ParseError {
        ParseError {
            kind,
            location,
            source: None,
        }
    }

    pub(crate) fn bad_date(location: Location) -> ParseError {
        ParseError::new(ParseErrorKind::BadDate, location)
    }

    pub(crate) fn bad_amount(location: Location) -> ParseError {
        ParseError::new(ParseErrorKind::BadAmount, location)
    }

    pub(crate) fn unexpected_end(location: Location) -> ParseError {
        ParseError::new(ParseErrorKind::UnexpectedEnd, location)
    }

    pub(crate) fn malformed(location: Location) -> ParseError {
        ParseError::new(ParseErrorKind::MalformedTransaction, location)
    }

    pub(crate) fn malformed_tag_line(location: Location) -> ParseError {
        ParseError::new(ParseErrorKind::MalformedTagLine, location)
    }

    pub(crate) fn io(err: std::io::Error, location: Location) -> ParseError {
        ParseError {
            kind: ParseErrorKind::Io,
            location,
            source: Some(Box::new(err)),
        }
    }
}

#[test]
fn test_display() {
    let err = ParseError::bad_amount(Location::new(12, 30));
    assert_eq!(err.to_string(), "Malformed or out of range amount on line 12");
    assert!(err.source().is_none());

    let err = ParseError::io(
        std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        Location::new(3, 0),
    );
    assert_eq!(err.kind, ParseErrorKind::Io);
    assert_eq!(
        err.to_string(),
        "Error reading input on line 3: stream did not contain valid UTF-8"
    );
    assert!(err.source().is_some());
}
