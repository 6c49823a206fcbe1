use std::collections::{HashMap, HashSet};

/// Tags attached to a transaction through a tag comment line.
///
/// In the below transaction, `food` and `weekly` are tags:
///
/// ```text
/// 2021/10/03 * Walmart
///     ; :food:weekly:
///     Expenses:Food                              $90.81
///     Liabilities:CreditCard:Discover
/// ```
pub type Tags = HashSet<String>;

/// Key/value pairs attached to a transaction through `Key: Value` comment lines.
/// A key may only appear once; the last line with a given key wins.
///
/// ```text
/// 2021/10/03 * Walmart
///     ; ID: 4xT9bKQe
///     ; RID: Pq7LmZ0c
///     Expenses:Food                              $90.81
///     Liabilities:CreditCard:Discover
/// ```
pub type KvPairs = HashMap<String, String>;

/// Key holding the identifier shared by every revision of a transaction.
pub const ID_KEY: &str = "ID";

/// Key holding the identifier of one particular revision of a transaction.
pub const RID_KEY: &str = "RID";

/// Key holding the identifier a financial institution assigned to an imported transaction.
pub const FITID_KEY: &str = "FITID";
