use std::path::PathBuf;

use ticker_lexicon::{DEFAULT_STOP_WORDS, EntityMatcher, Lexicon, LexiconError, LoadMode};
use ticker_types::EntityKind;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("stocks.tsv")
}

#[test]
fn loads_fixture_in_both_modes() {
    for mode in [LoadMode::Mmap, LoadMode::Owned] {
        let lexicon = Lexicon::load_with_mode(fixture(), mode).expect("load fixture");
        assert_eq!(lexicon.entry_count(), 6);
        assert_eq!(lexicon.symbol_count(), 6);
        assert_eq!(lexicon.company_count(), 5);
        assert_eq!(lexicon.company_for_symbol("GOOGL"), Some("Alphabet Inc."));
        assert_eq!(lexicon.symbols_for_company("Alphabet Inc."), Some("GOOG, GOOGL"));
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Lexicon::load(fixture().with_file_name("missing.tsv")).unwrap_err();
    assert!(matches!(err, LexiconError::Io { .. }));
    assert!(err.to_string().contains("missing.tsv"));
}

#[test]
fn header_only_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stocks.tsv");
    std::fs::write(&path, "Symbol\tCompanyName\n").unwrap();
    let err = Lexicon::load_with_mode(&path, LoadMode::Owned).unwrap_err();
    assert!(matches!(err, LexiconError::Empty));
}

#[test]
fn matcher_over_fixture_skips_stop_words() {
    let lexicon = Lexicon::load(fixture()).expect("load fixture");
    let matcher = EntityMatcher::new(&lexicon, DEFAULT_STOP_WORDS).expect("build matcher");
    let spans = matcher.find("A UK Select Fund manager sold GOOG and bought Apple Inc.");
    let found: Vec<_> = spans.iter().map(|s| (s.text, s.kind)).collect();
    assert_eq!(
        found,
        vec![
            ("UK Select Fund", EntityKind::Company),
            ("GOOG", EntityKind::Stock),
            ("Apple Inc.", EntityKind::Company),
        ]
    );
}
