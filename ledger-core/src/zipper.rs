//! Deterministic merging of two diverged transaction logs, and the slicing used to resync them.

use std::cmp::Ordering;

use log::{debug, trace};
use thiserror::Error;

use super::directive::Directive;
use super::file::File;
use super::metadata::{FITID_KEY, ID_KEY, RID_KEY};
use super::transaction::Transaction;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MergeError {
    /// The other file's first transaction does not appear in the master file.
    #[error("No sync point found")]
    NoSyncPoint,
    /// Two transactions share a date and no identifying key tells them apart.
    #[error(
        "Could not order transactions {master} (line {master_line}) and {other} (line \
         {other_line}); ensure all transactions have ID and RID keys as appropriate"
    )]
    Unorderable {
        master: usize,
        master_line: u64,
        other: usize,
        other_line: u64,
    },
}

// Same entry in both histories: both carry the same ID. Revisions share their ID.
fn same_entry(a: &Transaction, b: &Transaction) -> bool {
    a.id().is_some() && a.id() == b.id()
}

// A key present on only one side sorts that side first.
fn compare_key(a: &Transaction, b: &Transaction, key: &str) -> Ordering {
    match (a.get(key), b.get(key)) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn order(a: &Transaction, b: &Transaction) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| compare_key(a, b, ID_KEY))
        .then_with(|| compare_key(a, b, RID_KEY))
        .then_with(|| compare_key(a, b, FITID_KEY))
}

fn merge_directives(master: &File, other: &File) -> Vec<Directive> {
    let mut directives = master.directives().to_vec();
    for directive in other.directives() {
        if !master.directives().contains(directive) {
            directives.push(directive.clone());
        }
    }
    for directive in &mut directives {
        directive.anchor = 0;
    }
    directives
}

/// Zips two files together in a deterministic manner.
///
/// `other`'s first transaction must also appear in `master`; the last such occurrence is
/// the sync point. Everything in `master` up to the sync point is kept, followed by the
/// stretch both files agree on, followed by the remaining transactions of both files
/// ordered by date, then by `ID`, `RID` and `FITID`.
///
/// Directives from both files are deduplicated and moved to the top of the result.
pub fn merge(master: &File, other: &File) -> Result<File, MergeError> {
    let directives = merge_directives(master, other);
    let a = master.transactions();
    let b = other.transactions();

    let first = match b.first() {
        Some(first) => first,
        None => {
            debug!("nothing to merge; keeping {} transactions", a.len());
            return Ok(File::new(a.to_vec(), directives));
        }
    };

    let sync = a
        .iter()
        .rposition(|t| same_entry(t, first))
        .ok_or(MergeError::NoSyncPoint)?;
    debug!("sync point at transaction {} (line {})", sync, a[sync].location.line());

    let mut transactions: Vec<Transaction> = a[..=sync].to_vec();

    let (mut i, mut j) = (sync + 1, 1);
    while i < a.len() && j < b.len() && same_entry(&a[i], &b[j]) {
        transactions.push(a[i].clone());
        i += 1;
        j += 1;
    }
    debug!("histories diverge at master {} / other {}", i, j);

    while i < a.len() && j < b.len() {
        match order(&a[i], &b[j]) {
            Ordering::Less => {
                trace!("taking master transaction {}", i);
                transactions.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                trace!("taking other transaction {}", j);
                transactions.push(b[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                return Err(MergeError::Unorderable {
                    master: i,
                    master_line: a[i].location.line(),
                    other: j,
                    other_line: b[j].location.line(),
                })
            }
        }
    }
    transactions.extend_from_slice(&a[i..]);
    transactions.extend_from_slice(&b[j..]);

    debug!(
        "merged {} + {} transactions into {}",
        a.len(),
        b.len(),
        transactions.len()
    );
    Ok(File::new(transactions, directives))
}

/// The part of `file` starting at the last transaction with the given `ID` (and `RID`, if
/// one is given).
///
/// Directives anchored after the cut are kept with their anchors rebased. If no
/// transaction matches, the whole file is returned.
pub fn tail(file: &File, id: &str, rid: Option<&str>) -> File {
    let transactions = file.transactions();
    let cut = transactions.iter().rposition(|t| {
        t.id() == Some(id) && rid.map_or(true, |rid| t.revision_id() == Some(rid))
    });
    let cut = match cut {
        Some(cut) => cut,
        None => {
            debug!("ID {} not found; tail is the whole file", id);
            return file.clone();
        }
    };
    debug!("tail cut at transaction {}", cut);

    let directives = file
        .directives()
        .iter()
        .filter(|d| d.anchor > cut)
        .map(|d| {
            let mut d = d.clone();
            d.anchor -= cut;
            d
        })
        .collect();

    File::new(transactions[cut..].to_vec(), directives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use chrono::NaiveDate;

    fn txn(day: u32, keys: &[(&str, &str)]) -> Transaction {
        Transaction::builder()
            .date(NaiveDate::from_ymd_opt(2022, 1, day).unwrap())
            .description(format!("day {}", day))
            .kv_pairs(
                keys.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
            .location(Location::new(u64::from(day) * 10, 1))
            .build()
    }

    fn directive(argument: &str, anchor: usize) -> Directive {
        Directive::builder()
            .keyword("account")
            .argument(argument)
            .anchor(anchor)
            .build()
    }

    fn ids(file: &File) -> Vec<String> {
        file.transactions()
            .iter()
            .map(|t| {
                let mut id = t.id().unwrap_or("-").to_string();
                if let Some(rid) = t.revision_id() {
                    id = format!("{}/{}", id, rid);
                }
                id
            })
            .collect()
    }

    fn common() -> Vec<Transaction> {
        vec![
            txn(1, &[("ID", "a")]),
            txn(2, &[("ID", "b")]),
            txn(3, &[("ID", "c")]),
        ]
    }

    #[test]
    fn merge_diverged_tails() {
        let mut a = common();
        a.push(txn(5, &[("ID", "e")]));
        a.push(txn(6, &[("ID", "g")]));
        let mut b = common()[1..].to_vec();
        b.push(txn(4, &[("ID", "d")]));
        b.push(txn(6, &[("ID", "f")]));

        let a = File::new(a, vec![directive("Assets:Cash", 2)]);
        let b = File::new(b, vec![directive("Assets:Cash", 0), directive("Assets:Bank", 1)]);

        let merged = merge(&a, &b).unwrap();
        assert_eq!(ids(&merged), vec!["a", "b", "c", "d", "e", "f", "g"]);

        let directives: Vec<_> = merged
            .directives()
            .iter()
            .map(|d| (d.argument.as_str(), d.anchor))
            .collect();
        assert_eq!(directives, vec![("Assets:Cash", 0), ("Assets:Bank", 0)]);
    }

    #[test]
    fn merge_is_symmetric_after_sync_point() {
        let mut a = common();
        a.push(txn(4, &[("ID", "y"), ("RID", "2")]));
        a.push(txn(4, &[("ID", "y"), ("RID", "1")]));
        a.push(txn(4, &[("FITID", "99")]));
        let mut b = common();
        b.push(txn(4, &[("ID", "x")]));
        b.push(txn(4, &[("FITID", "12")]));
        let a = File::new(a, vec![]);
        let b = File::new(b, vec![]);

        let ab = merge(&a, &b).unwrap();
        let ba = merge(&b, &a).unwrap();
        assert_eq!(ids(&ab), vec!["a", "b", "c", "x", "y/2", "y/1", "-", "-"]);
        assert_eq!(ab, ba);
        assert_eq!(ab, merge(&a, &b).unwrap());
    }

    #[test]
    fn merge_uses_last_occurrence_as_sync_point() {
        let a = File::new(
            vec![
                txn(1, &[("ID", "a")]),
                txn(2, &[("ID", "b")]),
                txn(3, &[("ID", "a")]),
            ],
            vec![],
        );
        let b = File::new(vec![txn(1, &[("ID", "a")]), txn(9, &[("ID", "z")])], vec![]);
        assert_eq!(ids(&merge(&a, &b).unwrap()), vec!["a", "b", "a", "z"]);
    }

    #[test]
    fn merge_without_sync_point() {
        let a = File::new(common(), vec![]);
        let b = File::new(vec![txn(1, &[("ID", "q")])], vec![]);
        assert_eq!(merge(&a, &b), Err(MergeError::NoSyncPoint));
    }

    #[test]
    fn merge_syncs_on_revision() {
        let a = File::new(common(), vec![]);
        let b = File::new(
            vec![
                txn(1, &[("ID", "a"), ("RID", "r1")]),
                txn(2, &[("ID", "b")]),
                txn(4, &[("ID", "d")]),
            ],
            vec![],
        );
        assert_eq!(ids(&merge(&a, &b).unwrap()), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn merge_unorderable() {
        let mut a = common();
        a.push(txn(7, &[]));
        let mut b = common();
        b.push(txn(7, &[]));
        let a = File::new(a, vec![]);
        let b = File::new(b, vec![]);
        assert_eq!(
            merge(&a, &b),
            Err(MergeError::Unorderable {
                master: 3,
                master_line: 70,
                other: 3,
                other_line: 70,
            })
        );
    }

    #[test]
    fn merge_with_empty_other() {
        let a = File::new(common(), vec![directive("Assets:Cash", 1)]);
        let merged = merge(&a, &File::default()).unwrap();
        assert_eq!(ids(&merged), vec!["a", "b", "c"]);
        assert_eq!(merged.directives()[0].anchor, 0);
    }

    #[test]
    fn tail_rebases_directives() {
        let file = File::new(
            common(),
            vec![
                directive("Assets:Zero", 0),
                directive("Assets:One", 1),
                directive("Assets:Two", 2),
                directive("Assets:End", 3),
            ],
        );

        let t = tail(&file, "b", None);
        assert_eq!(ids(&t), vec!["b", "c"]);
        let directives: Vec<_> = t
            .directives()
            .iter()
            .map(|d| (d.argument.as_str(), d.anchor))
            .collect();
        assert_eq!(directives, vec![("Assets:Two", 1), ("Assets:End", 2)]);
    }

    #[test]
    fn tail_matches_revision() {
        let file = File::new(
            vec![
                txn(1, &[("ID", "a"), ("RID", "1")]),
                txn(2, &[("ID", "b")]),
                txn(3, &[("ID", "a"), ("RID", "2")]),
            ],
            vec![],
        );
        assert_eq!(ids(&tail(&file, "a", None)), vec!["a/2"]);
        assert_eq!(ids(&tail(&file, "a", Some("1"))), vec!["a/1", "b", "a/2"]);
    }

    #[test]
    fn tail_not_found_is_whole_file() {
        let file = File::new(common(), vec![directive("Assets:Cash", 1)]);
        assert_eq!(tail(&file, "nope", None), file);
        assert_eq!(tail(&file, "a", Some("nope")), file);
    }

    #[test]
    fn tail_then_merge_reconstructs() {
        let mut transactions = common();
        transactions.push(txn(4, &[("ID", "d")]));
        let file = File::new(transactions, vec![]);

        let t = tail(&file, "c", None);
        let merged = merge(&file, &t).unwrap();
        assert_eq!(merged, file);
    }
}
