use chrono::NaiveDate;
use typed_builder::TypedBuilder;

use super::ids::IdSource;
use super::location::Location;
use super::metadata::{KvPairs, Tags, FITID_KEY, ID_KEY, RID_KEY};
use super::posting::Posting;
use super::status::Status;

/// A single ledger entry.
///
/// ```text
/// 2012/03/10=2012/03/12 * (1042) Grocery run
///     ; Paid with the old card.
///     ; :food:
///     ; ID: 4xT9bKQe
///     Expenses:Food                              $20.00
///     Assets:Cash
/// ```
///
/// Edits are never made in place: a changed transaction is appended as a new
/// value sharing the old one's `ID` with a fresh `RID` (see [`Transaction::revise`]).
///
/// Equality compares content only; `location` is ignored.
#[derive(Clone, Debug, TypedBuilder)]
pub struct Transaction {
    pub date: NaiveDate,

    /// The optional clearing date, written after `=`.
    #[builder(default, setter(strip_option))]
    pub clear_date: Option<NaiveDate>,

    #[builder(default)]
    pub status: Status,

    /// The parenthesized code.
    #[builder(default, setter(into, strip_option))]
    pub code: Option<String>,

    #[builder(default, setter(into))]
    pub description: String,

    #[builder(default)]
    pub postings: Vec<Posting>,

    /// Free-form comment lines, in order.
    #[builder(default)]
    pub comments: Vec<String>,

    #[builder(default)]
    pub tags: Tags,

    #[builder(default)]
    pub kv_pairs: KvPairs,

    /// Where the transaction starts in its source text.
    #[builder(default)]
    pub location: Location,
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.clear_date == other.clear_date
            && self.status == other.status
            && self.code == other.code
            && self.description == other.description
            && self.postings == other.postings
            && self.comments == other.comments
            && self.tags == other.tags
            && self.kv_pairs == other.kv_pairs
    }
}

impl Eq for Transaction {}

impl Transaction {
    /// Value of a key/value pair.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.kv_pairs.get(key).map(String::as_str)
    }

    /// The identifier shared by all revisions of this transaction.
    pub fn id(&self) -> Option<&str> {
        self.get(ID_KEY)
    }

    /// The identifier of this particular revision.
    pub fn revision_id(&self) -> Option<&str> {
        self.get(RID_KEY)
    }

    /// The identifier assigned by the financial institution this was imported from.
    pub fn import_id(&self) -> Option<&str> {
        self.get(FITID_KEY)
    }

    /// Copies this transaction as a new revision: same `ID`, fresh `RID`.
    pub fn revise(&self, ids: &dyn IdSource) -> Transaction {
        let mut revision = self.clone();
        revision.kv_pairs.insert(RID_KEY.to_string(), ids.next_id());
        revision
    }
}
