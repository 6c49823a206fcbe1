pub use account::{Account, AccountNameError, Payee};
pub use amount::{format_value, format_value_number, value_from_decimal, value_to_decimal};
pub use balance::{format_sums, sum_transactions, AccountSums, Balance, BalanceError};
pub use directive::Directive;
pub use file::File;
pub use ids::IdSource;
pub use location::Location;
pub use matcher::{Matcher, MatcherError};
pub use metadata::{KvPairs, Tags, FITID_KEY, ID_KEY, RID_KEY};
pub use posting::Posting;
pub use status::Status;
pub use transaction::Transaction;
pub use zipper::{merge, tail, MergeError};

pub mod account;
pub mod amount;
pub mod balance;
pub mod directive;
pub mod file;
pub mod ids;
pub mod location;
pub mod matcher;
pub mod metadata;
pub mod posting;
pub mod status;
pub mod transaction;
pub mod zipper;
