//! Tooling for plain-text ledger files.
//!
//! The data model, balancing and history merging live in [`model`], text input in
//! [`parser`] and text output in [`renderer`].
//!
//! ```
//! let text = "2021/09/29 * Gas\n\tExpenses:Car:Gas  $16.00\n\tLiabilities:CreditCard\n";
//! let file = ledger::parse(text).unwrap();
//!
//! let mut out = Vec::new();
//! ledger::render(&mut out, &file).unwrap();
//! assert_eq!(ledger::parse(std::str::from_utf8(&out).unwrap()).unwrap(), file);
//! ```

pub use ledger_core as model;
pub use ledger_parser as parser;
pub use ledger_render as renderer;

pub use ledger_core::{merge, tail, Directive, File, Posting, Status, Transaction};
pub use ledger_parser::{parse, parse_reader, ParseError};
pub use ledger_render::{render, RenderError};
