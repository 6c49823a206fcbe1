use ledger_core::amount::{format_value_number, CURRENCY};
use ledger_core::*;
use log::debug;
use std::{io, io::Write};
use thiserror::Error;
use typed_builder::TypedBuilder;


/// Layout settings for [`BasicRenderer`].
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct RenderOptions {
    /// Column width posting accounts are padded to before the amount.
    #[builder(default = 50)]
    pub account_width: usize,

    /// Indentation written in front of postings, comments and directive sub-lines.
    #[builder(default = "\t".to_string(), setter(into))]
    pub indent: String,

    /// Currency marker written in front of amounts.
    #[builder(default = CURRENCY.to_string(), setter(into))]
    pub currency: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions::builder().build()
    }
}

#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct BasicRenderer {
    options: RenderOptions,
}

impl BasicRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        BasicRenderer { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

/// Writes `file` in ledger format.
pub fn render<W: Write>(w: &mut W, file: &File) -> Result<(), RenderError> {
    BasicRenderer::default().render(file, w)
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("an io error occurred")]
    Io(#[from] io::Error),
    #[error(
        "transaction and directive lists do not interleave properly: directive anchored at \
         {anchor} with only {transactions} transactions"
    )]
    ImproperInterleave { anchor: usize, transactions: usize },
}

pub trait Renderer<T, W: Write> {
    type Error;
    fn render(&self, renderable: T, write: &mut W) -> Result<(), Self::Error>;
}

impl<'a, W: Write> Renderer<&'a File, W> for BasicRenderer {
    type Error = RenderError;

    /// Each directive is written in front of the transaction its anchor names, and every
    /// entry is preceded by a blank line.
    fn render(&self, file: &'a File, w: &mut W) -> Result<(), Self::Error> {
        let transactions = file.transactions();
        let directives = file.directives();
        let (mut t, mut d) = (0, 0);

        while t < transactions.len() || d < directives.len() {
            if d < directives.len() && directives[d].anchor == t {
                writeln!(w)?;
                self.render(&directives[d], w)?;
                d += 1;
                continue;
            }
            if t >= transactions.len() {
                return Err(RenderError::ImproperInterleave {
                    anchor: directives[d].anchor,
                    transactions: transactions.len(),
                });
            }
            writeln!(w)?;
            self.render(&transactions[t], w)?;
            t += 1;
        }

        debug!("rendered {} transactions and {} directives", t, d);
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Directive, W> for BasicRenderer {
    type Error = RenderError;
    fn render(&self, directive: &'a Directive, w: &mut W) -> Result<(), Self::Error> {
        writeln!(w, "{} {}", directive.keyword, directive.argument)?;
        for line in &directive.lines {
            writeln!(w, "{}{}", self.options.indent, line)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Transaction, W> for BasicRenderer {
    type Error = RenderError;
    fn render(&self, transaction: &'a Transaction, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{}", transaction.date.format("%Y/%m/%d"))?;
        if let Some(clear_date) = &transaction.clear_date {
            write!(w, "={}", clear_date.format("%Y/%m/%d"))?;
        }
        match transaction.status.marker() {
            Some(marker) => write!(w, " {} ", marker)?,
            None => write!(w, "   ")?,
        }
        if let Some(code) = &transaction.code {
            write!(w, "({}) ", code)?;
        }
        writeln!(w, "{}", transaction.description)?;

        let indent = &self.options.indent;
        for comment in &transaction.comments {
            writeln!(w, "{}; {}", indent, comment)?;
        }
        if !transaction.tags.is_empty() {
            let mut tags: Vec<_> = transaction.tags.iter().collect();
            tags.sort();
            write!(w, "{}; ", indent)?;
            for tag in tags {
                write!(w, ":{}", tag)?;
            }
            writeln!(w, ":")?;
        }
        let mut kv_pairs: Vec<_> = transaction.kv_pairs.iter().collect();
        kv_pairs.sort();
        for (key, value) in kv_pairs {
            writeln!(w, "{}; {}: {}", indent, key, value)?;
        }

        for posting in &transaction.postings {
            self.render(posting, w)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Posting, W> for BasicRenderer {
    type Error = RenderError;
    fn render(&self, posting: &'a Posting, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{}", self.options.indent)?;
        if let Some(marker) = posting.status.marker() {
            write!(w, "{} ", marker)?;
        }
        write!(w, "{}", posting.account)?;

        // At least two spaces, so that account names with single spaces read back whole.
        let padding = self
            .options
            .account_width
            .saturating_sub(posting.account.chars().count())
            .max(2);

        if !posting.null {
            write!(w, "{:padding$}", "", padding = padding)?;
            if posting.value >= 0 {
                write!(w, " ")?;
            }
            write!(
                w,
                "{}{}",
                self.options.currency,
                format_value_number(posting.value)
            )?;
            if let Some(note) = &posting.note {
                write!(w, " ; {}", note)?;
            }
        } else if let Some(note) = &posting.note {
            write!(w, "{:padding$}; {}", "", note, padding = padding)?;
        }
        writeln!(w)?;
        Ok(())
    }
}
