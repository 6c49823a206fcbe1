use typed_builder::TypedBuilder;

use super::status::Status;

/// Represents a transaction posting. Postings represent a single amount being deposited to or
/// withdrawn from an account.
///
/// The amount may be left out on at most one posting per transaction, in which case it is
/// inferred so the transaction balances:
///
/// ```text
/// 2021/09/29 * Gas
///     Expenses:Car:Gas                           $16.00
///     Liabilities:CreditCard:Discover
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, TypedBuilder)]
pub struct Posting {
    #[builder(default)]
    pub status: Status,

    /// Account being posted to. May contain single spaces, but never two in a row or a tab.
    #[builder(setter(into))]
    pub account: String,

    /// The amount, in 1/10000 of the currency unit. Only meaningful when `null` is false.
    #[builder(default)]
    pub value: i64,

    /// True if the amount was not written and has to be inferred.
    #[builder(default)]
    pub null: bool,

    #[builder(default, setter(into, strip_option))]
    pub note: Option<String>,
}

impl Posting {
    /// A posting with a stated amount.
    pub fn new<S: Into<String>>(account: S, value: i64) -> Self {
        Posting {
            account: account.into(),
            value,
            ..Posting::default()
        }
    }

    /// A posting whose amount is inferred.
    pub fn inferred<S: Into<String>>(account: S) -> Self {
        Posting {
            account: account.into(),
            null: true,
            ..Posting::default()
        }
    }
}
