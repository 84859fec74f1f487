use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ticker_lexicon::{DEFAULT_STOP_WORDS, EntityMatcher, Lexicon, LoadMode};

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p ticker-lexicon --example stats -- <path-to-stocks.tsv>")?;

    let lexicon = Lexicon::load_with_mode(&path, LoadMode::Mmap)
        .with_context(|| format!("loading lexicon from {}", path.display()))?;
    let matcher = EntityMatcher::new(&lexicon, DEFAULT_STOP_WORDS)?;

    let mut multi_symbol: Vec<(&str, &str)> = lexicon
        .companies()
        .filter(|(_, symbols)| symbols.contains(", "))
        .collect();
    multi_symbol.sort();

    println!("Lexicon      : {}", path.display());
    println!("Rows         : {}", lexicon.entry_count());
    println!("Symbols      : {}", lexicon.symbol_count());
    println!("Companies    : {}", lexicon.company_count());
    println!("Patterns     : {}", matcher.pattern_count());
    println!("Multi-symbol companies: {}", multi_symbol.len());
    for (company, symbols) in multi_symbol {
        println!("  {:<30} {}", company, symbols);
    }

    // Spot-check a couple of tickers to confirm lookup.
    for symbol in ["AAPL", "GOOGL"] {
        println!(
            "Symbol '{}' resolves to {:?}",
            symbol,
            lexicon.company_for_symbol(symbol)
        );
    }

    Ok(())
}
