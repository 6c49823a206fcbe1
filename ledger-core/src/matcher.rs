//! Rewriting transactions by matching their descriptions.

use regex::Regex;
use thiserror::Error;

use super::account::AccountNameError;
use super::file::File;
use super::ids::IdSource;
use super::location::Location;
use super::transaction::Transaction;

/// A description pattern together with the account and/or payee to substitute on a match.
#[derive(Clone, Debug)]
pub struct Matcher {
    pub pattern: Regex,
    pub account: Option<String>,
    pub payee: Option<String>,
}

#[derive(Debug, Error)]
pub enum MatcherError {
    #[error(transparent)]
    AccountName(#[from] AccountNameError),
    #[error("Invalid pattern ({pattern}) in directive at {location}")]
    Pattern {
        pattern: String,
        location: Location,
        #[source]
        source: regex::Error,
    },
}

impl Matcher {
    pub fn new(
        pattern: &str,
        account: Option<String>,
        payee: Option<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Matcher {
            pattern: Regex::new(pattern)?,
            account,
            payee,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

fn compile(pattern: &str, location: Location) -> Result<Regex, MatcherError> {
    Regex::new(pattern).map_err(|source| MatcherError::Pattern {
        pattern: pattern.to_string(),
        location,
        source,
    })
}

impl Transaction {
    /// Applies the first matcher whose pattern matches the description.
    ///
    /// Only transactions with a posting on `account` are considered. The matcher's payee
    /// replaces the description, and its account replaces the account of every posting not
    /// on `account`. Returns whether a matcher was applied.
    pub fn apply_matchers(&mut self, account: &str, matchers: &[Matcher]) -> bool {
        if !self.postings.iter().any(|p| p.account == account) {
            return false;
        }
        let matcher = match matchers.iter().find(|m| m.is_match(&self.description)) {
            Some(matcher) => matcher,
            None => return false,
        };

        if let Some(payee) = &matcher.payee {
            self.description = payee.clone();
        }
        if let Some(target) = &matcher.account {
            for posting in self.postings.iter_mut().filter(|p| p.account != account) {
                posting.account = target.clone();
            }
        }
        true
    }
}

impl File {
    /// Rewritten copies of every transaction a matcher applies to, each as a new revision.
    pub fn matched(
        &self,
        account: &str,
        matchers: &[Matcher],
        ids: &dyn IdSource,
    ) -> Vec<Transaction> {
        self.transactions()
            .iter()
            .filter_map(|transaction| {
                let mut rewritten = transaction.revise(ids);
                if rewritten.apply_matchers(account, matchers) {
                    Some(rewritten)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Builds matchers from the file's directives.
    ///
    /// Every `payee` sub-directive of an account is a pattern assigning that account. Each
    /// `payee` directive whose name one of those patterns matches contributes its aliases as
    /// patterns assigning both the account and the payee name. An account's payee-specific
    /// matchers come before its generic ones.
    pub fn matchers(&self) -> Result<Vec<Matcher>, MatcherError> {
        let accounts = self.accounts()?;
        let payees = self.payees();

        let mut matchers = Vec::new();
        for account in &accounts {
            let generic = account
                .payees
                .iter()
                .map(|pattern| {
                    Ok(Matcher {
                        pattern: compile(pattern, account.location)?,
                        account: Some(account.name.clone()),
                        payee: None,
                    })
                })
                .collect::<Result<Vec<_>, MatcherError>>()?;

            for payee in &payees {
                if !generic.iter().any(|m| m.is_match(&payee.name)) {
                    continue;
                }
                for alias in &payee.aliases {
                    matchers.push(Matcher {
                        pattern: compile(alias, payee.location)?,
                        account: Some(account.name.clone()),
                        payee: Some(payee.name.clone()),
                    });
                }
            }

            matchers.extend(generic);
        }

        Ok(matchers)
    }
}
