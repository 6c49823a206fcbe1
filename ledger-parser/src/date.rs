use chrono::NaiveDate;

use super::error::{ParseError, ParseResult};
use super::lexical::{DATE_SEPARATORS, DIGITS};
use super::reader::CharReader;

// Reads up to `limit` digits, requiring at least one and rejecting a longer run.
fn date_part<I: Iterator<Item = char>>(
    cr: &mut CharReader<I>,
    limit: usize,
    exact: bool,
) -> ParseResult<u32> {
    let mut digits = String::new();
    let full = cr.read_while_limit(DIGITS, &mut digits, limit);
    if digits.is_empty() || (exact && !full) {
        return Err(if cr.is_eof() {
            ParseError::unexpected_end(cr.location())
        } else {
            ParseError::bad_date(cr.location())
        });
    }
    if cr.matches_digit() {
        return Err(ParseError::bad_date(cr.location()));
    }
    if cr.is_eof() {
        return Err(ParseError::unexpected_end(cr.location()));
    }
    digits
        .parse()
        .map_err(|_| ParseError::bad_date(cr.location()))
}

fn separator<I: Iterator<Item = char>>(cr: &mut CharReader<I>) -> ParseResult<()> {
    if !cr.matches(DATE_SEPARATORS) {
        return Err(ParseError::bad_date(cr.location()));
    }
    cr.advance();
    Ok(())
}

/// Reads a `yyyy/mm/dd` date. Any of `/`, `-` and `.` may separate the parts, and month
/// and day may be one or two digits. The date must be followed by more input.
pub fn date<I: Iterator<Item = char>>(cr: &mut CharReader<I>) -> ParseResult<NaiveDate> {
    let start = cr.location();

    let year = date_part(cr, 4, true)?;
    separator(cr)?;
    let month = date_part(cr, 2, false)?;
    separator(cr)?;
    let day = date_part(cr, 2, false)?;

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| ParseError::bad_date(start))
}
