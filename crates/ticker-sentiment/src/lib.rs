//! Lexical sentiment scoring for news text.
//!
//! Two independent models are combined:
//! 1. VADER rule-based polarity (`pos`/`neu`/`neg` proportions and a
//!    normalised `compound` score in `[-1, 1]`).
//! 2. A Pattern-style subjectivity model loaded from a word table (see
//!    [`SubjectivityModel`]).
//!
//! Both are pure functions of the input text. [`SentimentScorer`] also finds
//! the most negative and most positive sentence of a text; the returned
//! [`Sentence`]s borrow from the input.
//!
//! # Example
//! ```no_run
//! use ticker_sentiment::{SentimentScorer, SubjectivityModel};
//!
//! # fn main() -> Result<(), ticker_sentiment::SubjectivityError> {
//! let scorer = SentimentScorer::new(SubjectivityModel::load("data/subjectivity.tsv")?);
//! let text = "Revenue beat forecasts. Guidance was terrible.";
//! let result = scorer.score(text);
//! println!("subjectivity {:.2}, compound {:.2}", result.subjectivity, result.polarity.compound);
//!
//! let pair = scorer.polarizing_sentences(text);
//! println!("most negative: {:?}", pair.most_negative.map(|s| s.text));
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p ticker-sentiment --example score -- <file>`.

pub mod sentences;
pub mod subjectivity;

use ticker_types::{PolarizingPair, Polarity, Sentence, SentimentResult};
use vader_sentiment::SentimentIntensityAnalyzer;

pub use sentences::split_sentences;
pub use subjectivity::{Assessment, SubjectivityError, SubjectivityModel};

/// Polarity and subjectivity scorer; build once and share.
pub struct SentimentScorer {
    vader: SentimentIntensityAnalyzer<'static>,
    subjectivity: SubjectivityModel,
}

impl SentimentScorer {
    pub fn new(subjectivity: SubjectivityModel) -> Self {
        Self {
            vader: SentimentIntensityAnalyzer::new(),
            subjectivity,
        }
    }

    /// Subjectivity in `[0, 1]`, where `0.0` is objective.
    pub fn subjectivity(&self, text: &str) -> f64 {
        self.subjectivity.subjectivity(text)
    }

    /// VADER polarity scores; all zero for blank text.
    pub fn polarity(&self, text: &str) -> Polarity {
        if text.trim().is_empty() {
            return Polarity::default();
        }
        let scores = self.vader.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        Polarity {
            pos: get("pos"),
            neu: get("neu"),
            neg: get("neg"),
            compound: get("compound").clamp(-1.0, 1.0),
        }
    }

    pub fn score(&self, text: &str) -> SentimentResult {
        SentimentResult {
            subjectivity: self.subjectivity(text),
            polarity: self.polarity(text),
        }
    }

    /// Sentences with the minimum and maximum compound polarity.
    ///
    /// Comparisons are strict, so the first sentence wins a tie.
    pub fn polarizing_sentences<'t>(&self, text: &'t str) -> PolarizingPair<'t> {
        let mut pair = PolarizingPair::default();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (start, sentence) in split_sentences(text) {
            let compound = self.polarity(sentence).compound;
            let scored = Sentence {
                text: sentence,
                start,
                compound,
            };
            if compound < min {
                min = compound;
                pair.most_negative = Some(scored);
            }
            if compound > max {
                max = compound;
                pair.most_positive = Some(scored);
            }
        }
        pair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polarity_only() -> SentimentScorer {
        SentimentScorer::new(SubjectivityModel::default())
    }

    #[test]
    fn blank_text_scores_zero() {
        let scorer = polarity_only();
        assert_eq!(scorer.score(""), SentimentResult::default());
        assert_eq!(scorer.polarity("   \n"), Polarity::default());
    }

    #[test]
    fn positive_text_has_positive_compound() {
        let scorer = polarity_only();
        let polarity = scorer
            .polarity("This is a wonderful, excellent result. Investors are happy and delighted.");
        assert!(polarity.compound > 0.0, "got {polarity:?}");
        assert!(polarity.pos > polarity.neg);
    }

    #[test]
    fn negative_text_has_negative_compound() {
        let scorer = polarity_only();
        let polarity = scorer.polarity("The collapse was terrible and the losses were awful.");
        assert!(polarity.compound < 0.0, "got {polarity:?}");
    }

    #[test]
    fn compound_stays_in_range() {
        let scorer = polarity_only();
        let text = "GREAT!!! AMAZING!!! The best, most wonderful, excellent news ever!!!";
        let compound = scorer.polarity(text).compound;
        assert!((-1.0..=1.0).contains(&compound));
    }

    #[test]
    fn finds_polarizing_sentences() {
        let scorer = polarity_only();
        let text = "The rally was great and wonderful. The crash was terrible and awful.";
        let pair = scorer.polarizing_sentences(text);
        let negative = pair.most_negative.expect("negative sentence");
        let positive = pair.most_positive.expect("positive sentence");
        assert_eq!(negative.text, "The crash was terrible and awful.");
        assert_eq!(positive.text, "The rally was great and wonderful.");
        assert_eq!(&text[negative.start..negative.start + negative.text.len()], negative.text);
        assert!(negative.compound < positive.compound);
    }

    #[test]
    fn single_sentence_is_both_extremes() {
        let scorer = polarity_only();
        let pair = scorer.polarizing_sentences("Markets were great today.");
        assert_eq!(pair.most_negative, pair.most_positive);
        assert_eq!(
            pair.most_negative.map(|s| s.text),
            Some("Markets were great today.")
        );
    }

    #[test]
    fn ties_keep_first_sentence() {
        let scorer = polarity_only();
        let pair = scorer.polarizing_sentences("The meeting is on Monday. The call is on Tuesday.");
        assert_eq!(
            pair.most_negative.map(|s| s.text),
            Some("The meeting is on Monday.")
        );
        assert_eq!(
            pair.most_positive.map(|s| s.text),
            Some("The meeting is on Monday.")
        );
    }

    #[test]
    fn empty_text_has_no_polarizing_sentences() {
        let scorer = polarity_only();
        assert!(scorer.polarizing_sentences("").is_empty());
    }

    #[test]
    fn score_combines_polarity_and_subjectivity() {
        let model = SubjectivityModel::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../data/subjectivity.tsv"
        ))
        .unwrap();
        let scorer = SentimentScorer::new(model);
        let text = "Shares hit a new high as more investors bought the stock.";
        let result = scorer.score(text);
        assert!((result.subjectivity - 0.498182).abs() < 1e-3, "got {result:?}");
        assert_eq!(result.polarity, scorer.polarity(text));
    }
}
