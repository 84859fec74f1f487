use std::path::PathBuf;

use newsscan::{CoreConfig, CoreContext, compose_article, initialize};
use ticker_lexicon::LoadMode;
use ticker_types::EntityKind;

fn bundled_lexicon() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/stocks.tsv")
}

fn bundled_subjectivity() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/subjectivity.tsv")
}

fn context() -> CoreContext {
    let config = CoreConfig {
        lexicon_path: bundled_lexicon(),
        load_mode: LoadMode::Mmap,
        subjectivity_path: bundled_subjectivity(),
        ..CoreConfig::default()
    };
    initialize(&config).expect("bundled lexicon loads")
}

#[test]
fn bundled_lexicon_groups_share_classes() {
    let ctx = context();
    let lexicon = ctx.lexicon();
    assert_eq!(lexicon.symbols_for_company("Alphabet"), Some("GOOG, GOOGL"));
    assert_eq!(
        lexicon.symbols_for_company("Berkshire Hathaway"),
        Some("BRK.A, BRK.B")
    );
    assert_eq!(lexicon.company_for_symbol("BRK.B"), Some("Berkshire Hathaway"));
}

#[test]
fn alphabet_mentioned_once_lists_both_symbols() {
    let ctx = context();
    let table = ctx
        .count_mentions("Alphabet unveiled a new chip on Tuesday.")
        .unwrap()
        .expect("mentions");
    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].company, "Alphabet");
    assert_eq!(table.rows()[0].symbol, "GOOG, GOOGL");
    assert_eq!(table.rows()[0].count, 1);
}

#[test]
fn stop_listed_tokens_never_match() {
    let ctx = context();
    let text = "A UK fund bought two blocks of RBC stock.";
    assert!(ctx.find_entities(text).is_empty());
    assert_eq!(ctx.count_mentions(text).unwrap(), None);
}

#[test]
fn symbols_and_names_fold_into_one_row() {
    let ctx = context();
    let text = "Nvidia rallied. NVDA closed at a record while Intel and INTC lagged. Nvidia led.";
    let spans = ctx.find_entities(text);
    assert_eq!(spans.len(), 5);
    assert!(spans.windows(2).all(|w| w[0].end() <= w[1].start));
    assert_eq!(spans[1].kind, EntityKind::Stock);
    assert_eq!(spans[2].kind, EntityKind::Company);

    let table = ctx.count_mentions(text).unwrap().expect("mentions");
    assert_eq!(table.total(), spans.len());
    let main = table.main().expect("main mention");
    assert_eq!(main.company, "Nvidia");
    assert_eq!(main.symbol, "NVDA");
    assert_eq!(main.count, 3);
    assert_eq!(table.rows()[1].company, "Intel");
    assert_eq!(table.rows()[1].count, 2);
}

#[test]
fn article_report_combines_all_stages() {
    let ctx = context();
    let text = compose_article(
        "Tesla shares soar",
        "TSLA gained after a great quarter. Ford fell on terrible guidance.",
    );
    let report = ctx.analyze(&text).expect("analyze");
    assert_eq!(report.text, text);

    let main = report.main_mention().expect("main mention");
    assert_eq!(main.company, "Tesla");
    assert_eq!(main.count, 2);

    assert!((-1.0..=1.0).contains(&report.sentiment.polarity.compound));
    assert!((0.0..=1.0).contains(&report.sentiment.subjectivity));
    let negative = report.polarizing.most_negative.expect("negative sentence");
    assert_eq!(negative.text, "Ford fell on terrible guidance.");
    assert_eq!(&text[negative.start..negative.start + negative.text.len()], negative.text);
}
