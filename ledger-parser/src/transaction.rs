use log::trace;

use ledger_core::{Posting, Status, Transaction};

use super::amount::amount;
use super::date::date;
use super::error::{ParseError, ParseResult};
use super::lexical::{in_set, WHITESPACE};
use super::reader::CharReader;

/// How far a `;` line inside a transaction has been classified.
#[derive(Debug)]
enum CommentLine {
    /// Nothing read yet.
    Start,
    /// The line began with `:`; reading `:`-delimited tags.
    Tags,
    /// Reading something that may still turn out to be a key.
    Key,
    /// Found `key:` followed by whitespace; the rest is the value.
    Value(String),
    /// A free-form comment.
    Plain,
}

/// Parses one transaction, from its date through the last indented line belonging to it.
pub fn transaction<I: Iterator<Item = char>>(cr: &mut CharReader<I>) -> ParseResult<Transaction> {
    let location = cr.location();

    let primary = date(cr)?;
    let clear_date = if cr.at('=') {
        cr.advance();
        Some(date(cr)?)
    } else {
        None
    };

    cr.eat(WHITESPACE);
    if cr.is_eof() {
        return Err(ParseError::unexpected_end(cr.location()));
    }

    let status = status(cr);
    cr.eat(WHITESPACE);

    let code = if cr.at('(') {
        cr.advance();
        let mut code = String::new();
        cr.read_until(")\n", &mut code);
        if cr.is_eof() {
            return Err(ParseError::unexpected_end(cr.location()));
        }
        if cr.at('\n') {
            return Err(ParseError::malformed(cr.location()));
        }
        cr.advance();
        cr.eat(WHITESPACE);
        Some(code.trim().to_string())
    } else {
        None
    };

    let mut description = String::new();
    cr.read_until("\n", &mut description);
    cr.advance();

    let mut transaction = Transaction {
        date: primary,
        clear_date,
        status,
        code,
        description: description.trim().to_string(),
        postings: Vec::new(),
        comments: Vec::new(),
        tags: Default::default(),
        kv_pairs: Default::default(),
        location,
    };

    while cr.matches(WHITESPACE) {
        cr.eat(WHITESPACE);
        if cr.is_eof() || cr.at('\n') {
            break;
        }
        if cr.at(';') {
            comment_line(cr, &mut transaction)?;
        } else {
            transaction.postings.push(posting(cr)?);
        }
    }

    trace!(
        "transaction on line {} with {} postings",
        location.line(),
        transaction.postings.len()
    );
    Ok(transaction)
}

fn status<I: Iterator<Item = char>>(cr: &mut CharReader<I>) -> Status {
    match cr.current().and_then(Status::from_marker) {
        Some(status) => {
            cr.advance();
            status
        }
        None => Status::Undefined,
    }
}

// Classifies one `;` line as tags, a key/value pair or a free comment.
fn comment_line<I: Iterator<Item = char>>(
    cr: &mut CharReader<I>,
    transaction: &mut Transaction,
) -> ParseResult<()> {
    let location = cr.location();
    cr.advance();
    cr.eat(WHITESPACE);

    let mut state = CommentLine::Start;
    let mut buf = String::new();

    while let Some(c) = cr.current().filter(|&c| c != '\n') {
        match state {
            CommentLine::Start => {
                if c == ':' {
                    state = CommentLine::Tags;
                } else {
                    buf.push(c);
                    state = CommentLine::Key;
                }
                cr.advance();
            }
            CommentLine::Tags => {
                cr.advance();
                if c == ':' {
                    let tag = buf.trim();
                    if !tag.is_empty() {
                        transaction.tags.insert(tag.to_string());
                    }
                    buf.clear();
                    cr.eat(WHITESPACE);
                } else {
                    buf.push(c);
                }
            }
            CommentLine::Key => {
                if c == ':' && cr.next_matches(WHITESPACE) {
                    state = CommentLine::Value(std::mem::take(&mut buf));
                    cr.advance();
                    cr.eat(WHITESPACE);
                } else {
                    if c == ':' || in_set(c, WHITESPACE) {
                        state = CommentLine::Plain;
                    }
                    buf.push(c);
                    cr.advance();
                }
            }
            CommentLine::Value(_) | CommentLine::Plain => {
                buf.push(c);
                cr.advance();
            }
        }
    }
    cr.advance();

    match state {
        CommentLine::Start => {}
        CommentLine::Tags => {
            if !buf.trim().is_empty() {
                return Err(ParseError::malformed_tag_line(location));
            }
        }
        CommentLine::Key | CommentLine::Plain => {
            transaction.comments.push(buf.trim().to_string());
        }
        CommentLine::Value(key) => {
            transaction.kv_pairs.insert(key, buf.trim().to_string());
        }
    }
    Ok(())
}

fn posting<I: Iterator<Item = char>>(cr: &mut CharReader<I>) -> ParseResult<Posting> {
    let status = status(cr);
    cr.eat(WHITESPACE);

    // Single spaces belong to the account name; two spaces, a tab or a newline end it.
    let mut account = String::new();
    while let Some(c) = cr.current() {
        if c == '\t' || c == '\n' || (c == ' ' && cr.peek() == Some(' ')) {
            break;
        }
        account.push(c);
        cr.advance();
    }
    let account = account.trim_end();
    if account.is_empty() {
        return Err(ParseError::malformed(cr.location()));
    }

    cr.eat(WHITESPACE);
    let value = amount(cr)?;
    cr.eat(WHITESPACE);

    let note = match cr.current() {
        None => None,
        Some('\n') => {
            cr.advance();
            None
        }
        Some(';') => {
            cr.advance();
            let mut note = String::new();
            cr.read_until("\n", &mut note);
            cr.advance();
            Some(note.trim().to_string()).filter(|note| !note.is_empty())
        }
        Some(_) => return Err(ParseError::malformed(cr.location())),
    };

    Ok(Posting {
        status,
        account: account.to_string(),
        value: value.unwrap_or(0),
        null: value.is_none(),
        note,
    })
}
