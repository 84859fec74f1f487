use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use ticker_lexicon::Lexicon;
use ticker_types::{EntityKind, EntitySpan};

/// How often one company is mentioned, with all of its symbols.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MentionCount {
    pub company: String,
    pub symbol: String,
    pub count: usize,
}

/// Mention counts unique by company, ordered by count descending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MentionTable {
    rows: Vec<MentionCount>,
}

impl MentionTable {
    pub fn rows(&self) -> &[MentionCount] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<MentionCount> {
        self.rows
    }

    /// The most mentioned company.
    pub fn main(&self) -> Option<&MentionCount> {
        self.rows.first()
    }

    /// Sum of all counts, i.e. the number of matched spans.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }
}

#[derive(Debug, Error)]
pub enum MentionError {
    #[error("symbol {0:?} is not in the lexicon")]
    UnknownSymbol(String),
    #[error("company {0:?} has no symbols in the lexicon")]
    UnresolvedCompany(String),
}

/// Aggregate matched spans into a ranked mention table.
///
/// Returns `Ok(None)` when there are no spans. Any span that cannot be
/// resolved fails the whole aggregation.
pub fn count_mentions<'a>(
    spans: &[EntitySpan<'a>],
    lexicon: &'a Lexicon,
) -> Result<Option<MentionTable>, MentionError> {
    if spans.is_empty() {
        return Ok(None);
    }

    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut grouped: Vec<(&'a str, usize)> = Vec::new();
    for span in spans {
        let company = match span.kind {
            EntityKind::Stock => lexicon
                .company_for_symbol(span.text)
                .ok_or_else(|| MentionError::UnknownSymbol(span.text.to_string()))?,
            EntityKind::Company => span.text,
        };
        match positions.get(company) {
            Some(&idx) => grouped[idx].1 += 1,
            None => {
                positions.insert(company, grouped.len());
                grouped.push((company, 1));
            }
        }
    }

    let mut rows = grouped
        .into_iter()
        .map(|(company, count)| {
            let symbol = lexicon
                .symbols_for_company(company)
                .ok_or_else(|| MentionError::UnresolvedCompany(company.to_string()))?;
            Ok(MentionCount {
                company: company.to_string(),
                symbol: symbol.to_string(),
                count,
            })
        })
        .collect::<Result<Vec<_>, MentionError>>()?;
    // Stable: ties keep first-seen order.
    rows.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(Some(MentionTable { rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_types::LexiconEntry;

    fn lexicon(rows: &[(&str, &str)]) -> Lexicon {
        Lexicon::from_entries(
            rows.iter()
                .map(|(symbol, company)| LexiconEntry::new(*symbol, *company))
                .collect(),
        )
        .expect("build lexicon")
    }

    fn span(text: &str, kind: EntityKind) -> EntitySpan<'_> {
        EntitySpan {
            text,
            start: 0,
            kind,
        }
    }

    #[test]
    fn no_spans_is_none() {
        let lex = lexicon(&[("AAPL", "Apple Inc.")]);
        assert_eq!(count_mentions(&[], &lex).unwrap(), None);
    }

    #[test]
    fn stock_spans_fold_into_company() {
        let lex = lexicon(&[("AAPL", "Apple Inc.")]);
        let spans = [
            span("Apple Inc.", EntityKind::Company),
            span("AAPL", EntityKind::Stock),
        ];
        let table = count_mentions(&spans, &lex).unwrap().expect("mentions");
        assert_eq!(
            table.rows(),
            &[MentionCount {
                company: "Apple Inc.".into(),
                symbol: "AAPL".into(),
                count: 2,
            }]
        );
    }

    #[test]
    fn sorts_descending_and_keeps_first_seen_on_ties() {
        let lex = lexicon(&[
            ("MSFT", "Microsoft"),
            ("AAPL", "Apple"),
            ("NVDA", "Nvidia"),
        ]);
        let spans = [
            span("Microsoft", EntityKind::Company),
            span("AAPL", EntityKind::Stock),
            span("Nvidia", EntityKind::Company),
            span("NVDA", EntityKind::Stock),
            span("Apple", EntityKind::Company),
            span("NVDA", EntityKind::Stock),
        ];
        let table = count_mentions(&spans, &lex).unwrap().expect("mentions");
        let order: Vec<_> = table
            .rows()
            .iter()
            .map(|r| (r.company.as_str(), r.count))
            .collect();
        assert_eq!(order, vec![("Nvidia", 3), ("Apple", 2), ("Microsoft", 1)]);
        assert_eq!(table.total(), spans.len());
        assert_eq!(table.main().map(|m| m.symbol.as_str()), Some("NVDA"));
    }

    #[test]
    fn attaches_all_symbols_of_company() {
        let lex = lexicon(&[("GOOG", "Alphabet Inc."), ("GOOGL", "Alphabet Inc.")]);
        let spans = [span("GOOGL", EntityKind::Stock)];
        let table = count_mentions(&spans, &lex).unwrap().expect("mentions");
        assert_eq!(table.rows()[0].symbol, "GOOG, GOOGL");
        assert_eq!(table.rows()[0].count, 1);
    }

    #[test]
    fn company_without_symbols_fails_whole_aggregation() {
        let lex = lexicon(&[("X", "Old Co"), ("X", "New Co"), ("AAPL", "Apple")]);
        let spans = [
            span("Apple", EntityKind::Company),
            span("Old Co", EntityKind::Company),
        ];
        let err = count_mentions(&spans, &lex).unwrap_err();
        assert!(matches!(err, MentionError::UnresolvedCompany(ref c) if c == "Old Co"));
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let lex = lexicon(&[("AAPL", "Apple")]);
        let err = count_mentions(&[span("ZZZZ", EntityKind::Stock)], &lex).unwrap_err();
        assert!(matches!(err, MentionError::UnknownSymbol(_)));
    }
}
