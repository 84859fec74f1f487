//! Load a stock symbol / company name lexicon and resolve ticker aliases.
//!
//! The lexicon is a tab-separated table with at least a `Symbol` and a
//! `CompanyName` column. Loading builds two reverse indices:
//!
//! - symbol → company name (last row wins on duplicate symbols), and
//! - company name → `", "`-joined sorted set of every symbol that resolves to
//!   it (companies with several share classes, e.g. `GOOG, GOOGL`).
//!
//! The company index is derived from the final symbol index, so every symbol
//! listed for a company maps back to that same company.
//!
//! Callers choose between memory-mapped files or owned buffers at runtime via
//! [`LoadMode`]. A [`Lexicon`] is immutable once built and safe to share
//! across threads.
//!
//! # Example
//! ```no_run
//! use ticker_lexicon::{EntityMatcher, LoadMode, Lexicon, DEFAULT_STOP_WORDS};
//!
//! # fn main() -> Result<(), ticker_lexicon::LexiconError> {
//! let lexicon = Lexicon::load_with_mode("data/stocks.tsv", LoadMode::Mmap)?;
//! println!("AAPL is {:?}", lexicon.company_for_symbol("AAPL"));
//!
//! let matcher = EntityMatcher::new(&lexicon, DEFAULT_STOP_WORDS)?;
//! for span in matcher.find("Apple Inc. shares rose. AAPL is up today.") {
//!     println!("{} @ {}: {}", span.kind, span.start, span.text);
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p ticker-lexicon --example stats -- <stocks.tsv>`.

pub mod matcher;

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use serde::Deserialize;
use thiserror::Error;
use ticker_types::LexiconEntry;
use tracing::{debug, info, warn};

pub use matcher::{DEFAULT_STOP_WORDS, EntityMatcher};

pub const SYMBOL_COLUMN: &str = "Symbol";
pub const COMPANY_COLUMN: &str = "CompanyName";

/// Strategy for reading the lexicon file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the lexicon file.
    Mmap,
    /// Read the lexicon file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed lexicon table: {0}")]
    Csv(#[from] csv::Error),
    #[error("lexicon is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("lexicon row {row} has an empty `{column}` field")]
    EmptyField { row: usize, column: &'static str },
    #[error("lexicon has no rows")]
    Empty,
    #[error("failed to build entity matcher: {0}")]
    Matcher(#[from] aho_corasick::BuildError),
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "CompanyName")]
    company_name: String,
}

/// Immutable lexicon with symbol and company reverse indices.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    symbol_index: HashMap<String, String>,
    company_index: HashMap<String, String>,
}

impl Lexicon {
    /// Load a lexicon table, memory-mapping the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    /// Load a lexicon table choosing between mmap and an owned buffer.
    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let buffer = load_file(path, mode)?;
        let lexicon = Self::from_reader(buffer.as_slice())?;
        info!(
            "loaded {} lexicon rows from {} ({} symbols, {} companies)",
            lexicon.entries.len(),
            path.display(),
            lexicon.symbol_index.len(),
            lexicon.company_index.len()
        );
        Ok(lexicon)
    }

    /// Parse a tab-separated table with `Symbol` and `CompanyName` headers.
    ///
    /// Extra columns are ignored; surrounding whitespace is trimmed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LexiconError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?;
        for column in [SYMBOL_COLUMN, COMPANY_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(LexiconError::MissingColumn(column));
            }
        }

        let mut entries = Vec::new();
        for row in reader.deserialize::<Row>() {
            let row = row?;
            entries.push(LexiconEntry {
                symbol: row.symbol,
                company_name: row.company_name,
            });
        }
        Self::from_entries(entries)
    }

    /// Build the indices from already-parsed rows.
    pub fn from_entries(entries: Vec<LexiconEntry>) -> Result<Self, LexiconError> {
        if entries.is_empty() {
            return Err(LexiconError::Empty);
        }

        let mut symbol_index: HashMap<String, String> = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if entry.symbol.is_empty() {
                return Err(LexiconError::EmptyField {
                    row: idx + 1,
                    column: SYMBOL_COLUMN,
                });
            }
            if entry.company_name.is_empty() {
                return Err(LexiconError::EmptyField {
                    row: idx + 1,
                    column: COMPANY_COLUMN,
                });
            }
            if let Some(previous) =
                symbol_index.insert(entry.symbol.clone(), entry.company_name.clone())
                && previous != entry.company_name
            {
                warn!(
                    "symbol {} reassigned from {:?} to {:?}",
                    entry.symbol, previous, entry.company_name
                );
            }
        }

        let mut grouped: HashMap<&str, BTreeSet<&str>> = HashMap::new();
        for (symbol, company) in &symbol_index {
            grouped
                .entry(company.as_str())
                .or_default()
                .insert(symbol.as_str());
        }
        let company_index: HashMap<String, String> = grouped
            .into_iter()
            .map(|(company, symbols)| {
                let joined = symbols.into_iter().collect::<Vec<_>>().join(", ");
                (company.to_string(), joined)
            })
            .collect();
        debug!(
            "lexicon indices built: {} symbols, {} companies",
            symbol_index.len(),
            company_index.len()
        );

        Ok(Self {
            entries,
            symbol_index,
            company_index,
        })
    }

    /// Rows in table order, duplicates included.
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Company name a ticker resolves to.
    pub fn company_for_symbol(&self, symbol: &str) -> Option<&str> {
        self.symbol_index.get(symbol).map(String::as_str)
    }

    /// Comma-joined symbols of a company, e.g. `"GOOG, GOOGL"`.
    pub fn symbols_for_company(&self, company: &str) -> Option<&str> {
        self.company_index.get(company).map(String::as_str)
    }

    /// Iterate over `(company, joined symbols)` pairs in no particular order.
    pub fn companies(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.company_index
            .iter()
            .map(|(company, symbols)| (company.as_str(), symbols.as_str()))
    }

    /// Number of table rows.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.symbol_index.len()
    }

    /// Number of companies that own at least one symbol.
    pub fn company_count(&self) -> usize {
        self.company_index.len()
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer, LexiconError> {
    let io_err = |source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    match mode {
        LoadMode::Mmap => unsafe { Mmap::map(&file) }
            .map(Buffer::Mmap)
            .map_err(io_err),
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).map_err(io_err)?;
            Ok(Buffer::Owned(buf))
        }
    }
}
