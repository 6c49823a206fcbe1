//! Structured views over `account` and `payee` directives.

use thiserror::Error;

use super::directive::Directive;
use super::file::File;
use super::location::Location;

/// An `account` directive. Sub-directives holding value expressions are not kept.
///
/// ```text
/// account Expenses:Food
///     alias food
///     payee ^(Walmart|Kroger)
///     note Groceries and eating out
///     default
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Account {
    pub name: String,
    /// Contents of the `note` sub-directive.
    pub note: Option<String>,
    /// One entry per `alias` sub-directive.
    pub aliases: Vec<String>,
    /// One pattern per `payee` sub-directive.
    pub payees: Vec<String>,
    /// True if a `default` sub-directive is present.
    pub default: bool,

    pub anchor: usize,
    /// Index of the directive within the file's directives.
    pub directive_index: usize,
    pub location: Location,
}

/// A `payee` directive.
///
/// ```text
/// payee Walmart
///     alias ^WAL-MART #\d+
///     uuid 2a3d1a40-42a5-4d4e-a6e5-1e6fa4c1bd6e
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Payee {
    /// The payee name to substitute when matched.
    pub name: String,
    /// One pattern per `alias` sub-directive.
    pub aliases: Vec<String>,
    pub uuids: Vec<String>,

    pub anchor: usize,
    pub directive_index: usize,
    pub location: Location,
}

/// An account or alias name that would not survive a round trip through the file format.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("Malformed account name ({name}) at {location}")]
pub struct AccountNameError {
    pub name: String,
    pub location: Location,
}

fn check_account_name(name: &str, location: Location) -> Result<(), AccountNameError> {
    if name.contains("  ") || name.contains(';') || name.contains('\t') {
        return Err(AccountNameError {
            name: name.to_string(),
            location,
        });
    }
    Ok(())
}

// The trimmed remainder of `line` if it starts with `keyword`.
fn sub_directive<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    line.strip_prefix(keyword).map(str::trim)
}

fn account(directive: &Directive, index: usize) -> Result<Account, AccountNameError> {
    check_account_name(&directive.argument, directive.location)?;

    let mut account = Account {
        name: directive.argument.clone(),
        anchor: directive.anchor,
        directive_index: index,
        location: directive.location,
        ..Account::default()
    };

    for (i, line) in directive.lines.iter().enumerate() {
        if sub_directive(line, "default").is_some() {
            account.default = true;
        } else if let Some(alias) = sub_directive(line, "alias") {
            let location = directive.location.lines_after(i as u64 + 1);
            check_account_name(alias, location)?;
            account.aliases.push(alias.to_string());
        } else if let Some(payee) = sub_directive(line, "payee") {
            account.payees.push(payee.to_string());
        } else if let Some(note) = sub_directive(line, "note") {
            account.note = Some(note.to_string());
        }
    }

    Ok(account)
}

fn payee(directive: &Directive, index: usize) -> Payee {
    let mut payee = Payee {
        name: directive.argument.clone(),
        anchor: directive.anchor,
        directive_index: index,
        location: directive.location,
        ..Payee::default()
    };

    for line in &directive.lines {
        if let Some(alias) = sub_directive(line, "alias") {
            payee.aliases.push(alias.to_string());
        } else if let Some(uuid) = sub_directive(line, "uuid") {
            payee.uuids.push(uuid.to_string());
        }
    }

    payee
}

impl File {
    /// All `account` directives, in the order they appear.
    pub fn accounts(&self) -> Result<Vec<Account>, AccountNameError> {
        self.directives()
            .iter()
            .enumerate()
            .filter(|(_, d)| d.keyword == "account")
            .map(|(i, d)| account(d, i))
            .collect()
    }

    /// All `payee` directives, in the order they appear. Payee names are free text, so this
    /// cannot fail.
    pub fn payees(&self) -> Vec<Payee> {
        self.directives()
            .iter()
            .enumerate()
            .filter(|(_, d)| d.keyword == "payee")
            .map(|(i, d)| payee(d, i))
            .collect()
    }
}
