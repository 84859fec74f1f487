//! Shared, borrow-friendly types for stock mention and sentiment analysis.
//!
//! Lexicon rows are owned ([`LexiconEntry`]); everything produced by scanning
//! a piece of text borrows from that text (`&str`) and keeps the byte offset
//! of where it was found, so callers can point back into the source article
//! without copying it.
//!
//! Use [`EntityKind`] to tell ticker hits from company-name hits, [`Polarity`]
//! and [`SentimentResult`] for scores, and [`PolarizingPair`] for the most
//! negative / most positive sentence of a text.
//!
//! ```rust
//! use ticker_types::{EntityKind, EntitySpan};
//!
//! let text = "AAPL is up today.";
//! let span = EntitySpan { text: &text[0..4], start: 0, kind: EntityKind::Stock };
//! assert_eq!(span.end(), 4);
//! assert_eq!(span.kind.to_string(), "Stock");
//! ```

use std::fmt;

/// What a matched span refers to: a ticker symbol or a company name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EntityKind {
    Stock,
    Company,
}

impl EntityKind {
    /// Label shown for the kind (`Stock` / `Company`).
    pub fn as_label(self) -> &'static str {
        match self {
            EntityKind::Stock => "Stock",
            EntityKind::Company => "Company",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// One `(symbol, company name)` row of the lexicon table.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexiconEntry {
    pub symbol: String,
    pub company_name: String,
}

impl LexiconEntry {
    pub fn new(symbol: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            company_name: company_name.into(),
        }
    }
}

/// A contiguous substring of a text recognised as a stock or company.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EntitySpan<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within the scanned string.
    pub start: usize,
    pub kind: EntityKind,
}

impl EntitySpan<'_> {
    /// Byte offset one past the end of the span.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// VADER-style polarity scores.
///
/// `pos`, `neu` and `neg` are proportions of the text; `compound` is the
/// normalised sum of valences in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polarity {
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
    pub compound: f64,
}

/// Whole-text sentiment: subjectivity in `[0, 1]` plus polarity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SentimentResult {
    pub subjectivity: f64,
    pub polarity: Polarity,
}

/// A sentence borrowed from the analysed text with its compound score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub start: usize,
    pub compound: f64,
}

/// The most negative and most positive sentences of a text.
///
/// Both are `None` for a text without sentences; both point at the same
/// sentence when there is only one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolarizingPair<'a> {
    pub most_negative: Option<Sentence<'a>>,
    pub most_positive: Option<Sentence<'a>>,
}

impl PolarizingPair<'_> {
    pub fn is_empty(&self) -> bool {
        self.most_negative.is_none() && self.most_positive.is_none()
    }
}
