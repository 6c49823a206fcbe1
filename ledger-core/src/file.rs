use std::collections::HashMap;

use super::directive::Directive;
use super::transaction::Transaction;

/// A parsed ledger file: transactions and directives, each in file order.
///
/// Directives are kept sorted by anchor; every way of building or extending a `File`
/// preserves that order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct File {
    transactions: Vec<Transaction>,
    directives: Vec<Directive>,
}

impl File {
    /// Builds a file, stably sorting the directives by anchor.
    pub fn new(transactions: Vec<Transaction>, mut directives: Vec<Directive>) -> Self {
        directives.sort_by_key(|d| d.anchor);
        File {
            transactions,
            directives,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Mutable access to the transactions. The count cannot change through this, so
    /// directive anchors stay valid.
    pub fn transactions_mut(&mut self) -> &mut [Transaction] {
        &mut self.transactions
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn push_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Adds a directive after every existing directive with the same or a lower anchor.
    pub fn push_directive(&mut self, directive: Directive) {
        let at = self
            .directives
            .partition_point(|d| d.anchor <= directive.anchor);
        self.directives.insert(at, directive);
    }

    pub fn into_parts(self) -> (Vec<Transaction>, Vec<Directive>) {
        (self.transactions, self.directives)
    }

    /// Collapses edit history: only the latest revision of every `ID` is kept, in the
    /// position where that `ID` first appeared. Transactions without an `ID` are kept.
    ///
    /// Only files whose directives are all anchored at the top (as merged files are) can be
    /// stripped; for any other file this returns `false` and leaves it untouched.
    pub fn strip_history(&mut self) -> bool {
        if self.directives.iter().any(|d| d.anchor != 0) {
            return false;
        }

        let mut kept: Vec<Transaction> = Vec::with_capacity(self.transactions.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        for transaction in self.transactions.drain(..) {
            let id = match transaction.id() {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => {
                    kept.push(transaction);
                    continue;
                }
            };
            match positions.get(&id) {
                Some(&at) => kept[at] = transaction,
                None => {
                    positions.insert(id, kept.len());
                    kept.push(transaction);
                }
            }
        }
        self.transactions = kept;
        true
    }
}
