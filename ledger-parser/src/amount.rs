use ledger_core::amount::{PRECISION, SCALE};

use super::error::{ParseError, ParseResult};
use super::lexical::{is_digit, WHITESPACE};
use super::reader::CharReader;

/// Reads an amount such as `$1,234.56` or `-12.5` into 1/10000 units.
///
/// Returns `None` when no digits are present, meaning the amount is to be inferred. A sign
/// without digits, a misplaced `.` or more than four fractional digits is an error, as is
/// a value that does not fit.
pub fn amount<I: Iterator<Item = char>>(cr: &mut CharReader<I>) -> ParseResult<Option<i64>> {
    let start = cr.location();

    if cr.at('$') {
        cr.advance();
        cr.eat(WHITESPACE);
    }

    let negative = cr.at('-');
    if negative {
        cr.advance();
    }

    let mut whole: i64 = 0;
    let mut fraction: i64 = 0;
    let mut fraction_digits: u32 = 0;
    let mut in_fraction = false;
    let mut any_digits = false;

    while let Some(c) = cr.current() {
        match c {
            '.' => {
                if in_fraction || !any_digits {
                    return Err(ParseError::bad_amount(cr.location()));
                }
                in_fraction = true;
            }
            ',' => {}
            c if is_digit(c) => {
                let digit = i64::from(c as u8 - b'0');
                if in_fraction {
                    fraction_digits += 1;
                    if fraction_digits > PRECISION {
                        return Err(ParseError::bad_amount(cr.location()));
                    }
                    fraction = fraction * 10 + digit;
                } else {
                    whole = whole
                        .checked_mul(10)
                        .and_then(|w| w.checked_add(digit))
                        .ok_or_else(|| ParseError::bad_amount(cr.location()))?;
                }
                any_digits = true;
            }
            _ => break,
        }
        cr.advance();
    }

    if !any_digits {
        if negative {
            return Err(ParseError::bad_amount(start));
        }
        return Ok(None);
    }

    let fraction = fraction * 10_i64.pow(PRECISION - fraction_digits);
    let value = whole
        .checked_mul(SCALE)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(|| ParseError::bad_amount(start))?;
    Ok(Some(if negative { -value } else { value }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use rstest::rstest;

    fn parse_amount(input: &str) -> ParseResult<Option<i64>> {
        amount(&mut CharReader::from_text(input, 1))
    }

    #[rstest]
    #[case("$20.00", Some(200000))]
    #[case("$ 20", Some(200000))]
    #[case("$-12.5", Some(-125000))]
    #[case("-0.0001", Some(-1))]
    #[case("1,234.56\n", Some(12345600))]
    #[case("9081.1", Some(90811000))]
    #[case("0.123", Some(1230))]
    #[case("7.", Some(70000))]
    #[case("$\n", None)]
    #[case("; note", None)]
    #[case("", None)]
    fn valid(#[case] input: &str, #[case] value: Option<i64>) {
        assert_eq!(parse_amount(input).unwrap(), value);
    }

    #[rstest]
    #[case("$-")]
    #[case("-\n")]
    #[case("$.50")]
    #[case("1.2.3")]
    #[case("1.23456")]
    #[case("99999999999999999999")]
    #[case("922337203685478")]
    fn invalid(#[case] input: &str) {
        assert_eq!(parse_amount(input).unwrap_err().kind, ParseErrorKind::BadAmount);
    }
}
