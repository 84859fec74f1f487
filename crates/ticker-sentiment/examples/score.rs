use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use ticker_sentiment::{SentimentScorer, SubjectivityModel};

const DEFAULT_SUBJECTIVITY: &str = "data/subjectivity.tsv";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let text = match args.next() {
        Some(flag) if flag == "--text" => args
            .next()
            .context("usage: cargo run -p ticker-sentiment --example score -- --text <text>")?,
        Some(path) => {
            let path = PathBuf::from(path);
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?
        }
        None => bail!(
            "usage: cargo run -p ticker-sentiment --example score -- [<file> | --text <text>]"
        ),
    };
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let lexicon_path =
        env::var("SUBJECTIVITY_PATH").unwrap_or_else(|_| DEFAULT_SUBJECTIVITY.to_string());
    let model = SubjectivityModel::load(&lexicon_path)
        .with_context(|| format!("loading subjectivity lexicon {lexicon_path}"))?;
    let scorer = SentimentScorer::new(model);
    let result = scorer.score(&text);
    println!("Subjectivity: {:.3}", result.subjectivity);
    println!(
        "Polarity    : pos {:.3} neu {:.3} neg {:.3} compound {:.3}",
        result.polarity.pos, result.polarity.neu, result.polarity.neg, result.polarity.compound
    );

    let pair = scorer.polarizing_sentences(&text);
    for (label, sentence) in [
        ("Most negative", pair.most_negative),
        ("Most positive", pair.most_positive),
    ] {
        match sentence {
            Some(s) => println!("{label} ({:+.3}): {}", s.compound, s.text),
            None => println!("{label}: -"),
        }
    }

    Ok(())
}
