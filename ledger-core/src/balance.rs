//! Balancing transactions and summing accounts.

use std::collections::BTreeMap;

use thiserror::Error;

use super::amount::format_value;
use super::transaction::Transaction;

/// Net value per account name.
pub type AccountSums = BTreeMap<String, i64>;

/// Outcome of balancing a single transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Balance {
    /// Postings sum to zero, or a single inferred posting absorbs the difference.
    Balanced(AccountSums),
    /// No inferred posting and the stated amounts leave `residual` behind.
    Unbalanced { residual: i64, sums: AccountSums },
    /// More than one posting has an inferred amount, so none can be derived.
    MultipleInferred,
    /// The amounts add up to more than a value can hold.
    Overflow,
}

impl Balance {
    pub fn is_balanced(&self) -> bool {
        matches!(self, Balance::Balanced(_))
    }

    /// Per-account contributions, if the transaction balances.
    pub fn sums(&self) -> Option<&AccountSums> {
        match self {
            Balance::Balanced(sums) => Some(sums),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BalanceError {
    #[error("{} does not balance", describe(.index, .line))]
    Unbalanced { index: Option<usize>, line: u64 },
    #[error("{} has multiple null postings", describe(.index, .line))]
    MultipleInferred { index: Option<usize>, line: u64 },
    #[error("{} overflows", describe(.index, .line))]
    Overflow { index: Option<usize>, line: u64 },
}

fn describe(index: &Option<usize>, line: &u64) -> String {
    match index {
        Some(index) => format!("Transaction {} (defined on line {})", index, line),
        None => format!("Transaction (defined on line {})", line),
    }
}

// Adds `value` into `slot`, or returns `None` if the sum does not fit.
fn accumulate(slot: &mut i64, value: i64) -> Option<()> {
    *slot = slot.checked_add(value)?;
    Some(())
}

impl Transaction {
    /// Checks that the postings add up to zero, allowing one inferred posting to take up the
    /// difference.
    pub fn balance(&self) -> Balance {
        let mut total = 0i64;
        let mut inferred = None;
        let mut sums = AccountSums::new();

        for posting in &self.postings {
            if posting.null {
                if inferred.is_some() {
                    return Balance::MultipleInferred;
                }
                inferred = Some(posting);
                continue;
            }
            let sum = sums.entry(posting.account.clone()).or_insert(0);
            if accumulate(&mut total, posting.value)
                .and_then(|_| accumulate(sum, posting.value))
                .is_none()
            {
                return Balance::Overflow;
            }
        }

        match inferred {
            Some(posting) => {
                let sum = sums.entry(posting.account.clone()).or_insert(0);
                let absorbed = total.checked_neg().and_then(|rest| accumulate(sum, rest));
                match absorbed {
                    Some(()) => Balance::Balanced(sums),
                    None => Balance::Overflow,
                }
            }
            None if total == 0 => Balance::Balanced(sums),
            None => Balance::Unbalanced {
                residual: total,
                sums,
            },
        }
    }

    /// Stores the inferred amount on the inferred posting, if there is one.
    ///
    /// The posting keeps its `null` flag; only its value becomes meaningful.
    pub fn canonicalize(&mut self) -> Result<(), BalanceError> {
        let line = self.location.line();
        let mut total = 0i64;
        let mut inferred = None;

        for (i, posting) in self.postings.iter().enumerate() {
            if posting.null {
                if inferred.is_some() {
                    return Err(BalanceError::MultipleInferred { index: None, line });
                }
                inferred = Some(i);
                continue;
            }
            accumulate(&mut total, posting.value)
                .ok_or(BalanceError::Overflow { index: None, line })?;
        }

        match inferred {
            Some(i) => {
                self.postings[i].value = total
                    .checked_neg()
                    .ok_or(BalanceError::Overflow { index: None, line })?;
                Ok(())
            }
            None if total == 0 => Ok(()),
            None => Err(BalanceError::Unbalanced { index: None, line }),
        }
    }
}

/// Balances every transaction and adds up the results per account.
pub fn sum_transactions(transactions: &[Transaction]) -> Result<AccountSums, BalanceError> {
    let mut accounts = AccountSums::new();

    for (i, transaction) in transactions.iter().enumerate() {
        let line = transaction.location.line();
        let sums = match transaction.balance() {
            Balance::Balanced(sums) => sums,
            Balance::Unbalanced { .. } => {
                return Err(BalanceError::Unbalanced {
                    index: Some(i),
                    line,
                })
            }
            Balance::MultipleInferred => {
                return Err(BalanceError::MultipleInferred {
                    index: Some(i),
                    line,
                })
            }
            Balance::Overflow => return Err(BalanceError::Overflow { index: Some(i), line }),
        };
        for (account, value) in sums {
            accumulate(accounts.entry(account).or_insert(0), value)
                .ok_or(BalanceError::Overflow { index: Some(i), line })?;
        }
    }

    Ok(accounts)
}

#[derive(Debug, Default)]
struct SumTree {
    children: BTreeMap<String, SumTree>,
    value: i64,
}

impl SumTree {
    fn insert(&mut self, account: &str, value: i64) {
        let mut level = self;
        for part in account.split(':') {
            level = level.children.entry(part.to_string()).or_default();
            level.value = level.value.saturating_add(value);
        }
    }

    fn render(&self, name: String, indent: &str, pad: &str, out: &mut Vec<(String, String)>) {
        // A node with a single child is shown on one line with it.
        if self.children.len() == 1 {
            if let Some((key, child)) = self.children.iter().next() {
                let name = if name.is_empty() {
                    key.clone()
                } else {
                    format!("{}:{}", name, key)
                };
                return child.render(name, indent, pad, out);
            }
        }

        let child_indent = if name.is_empty() {
            indent.to_string()
        } else {
            out.push((format!("{}{}", indent, name), format_value(self.value)));
            format!("{}{}", indent, pad)
        };

        for (key, child) in &self.children {
            child.render(key.clone(), &child_indent, pad, out);
        }
    }
}

/// Lays out account sums as a tree split on `:`, one `(indented name, formatted value)` pair
/// per line. Each level is indented by another `pad`. Subtotals saturate at the bounds of `i64`.
pub fn format_sums(sums: &AccountSums, pad: &str) -> Vec<(String, String)> {
    let mut root = SumTree::default();
    for (account, value) in sums {
        root.insert(account, *value);
    }

    let mut lines = Vec::new();
    root.render(String::new(), "", pad, &mut lines);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::posting::Posting;
    use chrono::NaiveDate;

    fn transaction(postings: Vec<Posting>) -> Transaction {
        Transaction::builder()
            .date(NaiveDate::from_ymd_opt(2012, 3, 10).unwrap())
            .description("Test")
            .postings(postings)
            .location(Location::new(7, 1))
            .build()
    }

    #[test]
    fn inferred_posting_absorbs_difference() {
        let t = transaction(vec![
            Posting::new("Expenses:Food", 200000),
            Posting::inferred("Assets:C a s h"),
        ]);
        let balance = t.balance();
        assert!(balance.is_balanced());
        let sums = balance.sums().unwrap();
        assert_eq!(sums["Expenses:Food"], 200000);
        assert_eq!(sums["Assets:C a s h"], -200000);
    }

    #[test]
    fn stated_amounts_must_cancel() {
        let t = transaction(vec![
            Posting::new("Expenses:Food", 200000),
            Posting::new("Assets:Cash", -150000),
        ]);
        match t.balance() {
            Balance::Unbalanced { residual, .. } => assert_eq!(residual, 50000),
            other => panic!("unexpected {:?}", other),
        }

        let t = transaction(vec![
            Posting::new("Expenses:Food", 200000),
            Posting::new("Assets:Cash", -200000),
        ]);
        assert!(t.balance().is_balanced());
    }

    #[test]
    fn two_inferred_postings_are_ambiguous() {
        let mut t = transaction(vec![
            Posting::new("A", 50000),
            Posting::inferred("B"),
            Posting::inferred("C"),
        ]);
        assert_eq!(t.balance(), Balance::MultipleInferred);
        assert_eq!(
            t.canonicalize(),
            Err(BalanceError::MultipleInferred {
                index: None,
                line: 7
            })
        );
    }

    #[test]
    fn canonicalize_fills_inferred_value() {
        let mut t = transaction(vec![
            Posting::new("Expenses:Food", 200000),
            Posting::new("Expenses:Drink", 15000),
            Posting::inferred("Assets:Cash"),
        ]);
        t.canonicalize().unwrap();
        assert_eq!(t.postings[2].value, -215000);
        assert!(t.postings[2].null);
        assert!(t.balance().is_balanced());
    }

    #[test]
    fn canonicalize_reports_unbalanced() {
        let mut t = transaction(vec![Posting::new("A", 1)]);
        assert_eq!(
            t.canonicalize(),
            Err(BalanceError::Unbalanced {
                index: None,
                line: 7
            })
        );
    }

    #[test]
    fn sum_transactions_reports_index() {
        let good = transaction(vec![Posting::new("A", 10000), Posting::inferred("B")]);
        let bad = transaction(vec![Posting::new("A", 10000)]);

        let sums = sum_transactions(&[good.clone(), good.clone()]).unwrap();
        assert_eq!(sums["A"], 20000);
        assert_eq!(sums["B"], -20000);

        let err = sum_transactions(&[good, bad]).unwrap_err();
        assert_eq!(
            err,
            BalanceError::Unbalanced {
                index: Some(1),
                line: 7
            }
        );
        assert_eq!(
            err.to_string(),
            "Transaction 1 (defined on line 7) does not balance"
        );
    }

    #[test]
    fn oversized_amounts_overflow() {
        let mut t = transaction(vec![
            Posting::new("A", 9_000_000_000_000_000_000),
            Posting::new("B", 9_000_000_000_000_000_000),
            Posting::inferred("C"),
        ]);
        assert_eq!(t.balance(), Balance::Overflow);
        assert_eq!(
            t.canonicalize(),
            Err(BalanceError::Overflow {
                index: None,
                line: 7
            })
        );

        // Each transaction fits on its own; the running total does not.
        let big = transaction(vec![
            Posting::new("A", 9_000_000_000_000_000_000),
            Posting::inferred("B"),
        ]);
        assert_eq!(
            sum_transactions(&[big.clone(), big]),
            Err(BalanceError::Overflow {
                index: Some(1),
                line: 7
            })
        );
    }

    #[test]
    fn format_sums_collapses_single_children() {
        let sums: AccountSums = vec![
            ("Assets:Cash".to_string(), 1000000),
            ("Assets:Bank:Checking".to_string(), 2000000),
            ("Expenses:Food".to_string(), -3000000),
        ]
        .into_iter()
        .collect();

        let lines = format_sums(&sums, "  ");
        let expected: Vec<(String, String)> = vec![
            ("Assets", "$300.00"),
            ("  Bank:Checking", "$200.00"),
            ("  Cash", "$100.00"),
            ("Expenses:Food", "$-300.00"),
        ]
        .into_iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
        assert_eq!(lines, expected);
    }
}
