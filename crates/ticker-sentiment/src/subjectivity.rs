use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use unicode_segmentation::UnicodeSegmentation;

/// How many following words a negation reaches.
const NEGATION_WINDOW: usize = 3;
/// Polarity flip applied to negated words ("not good" is mildly negative).
const NEGATION_FACTOR: f64 = -0.5;

const NEGATIONS: &[&str] = &["not", "never", "no", "nor", "without", "hardly"];

#[derive(Debug, Error)]
pub enum SubjectivityError {
    #[error("failed to read subjectivity lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed subjectivity lexicon: {0}")]
    Csv(#[from] csv::Error),
    #[error("subjectivity lexicon row {0} has an empty word")]
    EmptyWord(usize),
    #[error("subjectivity lexicon has no rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct Row {
    word: String,
    polarity: f64,
    subjectivity: f64,
    #[serde(default = "unit_intensity")]
    intensity: f64,
}

fn unit_intensity() -> f64 {
    1.0
}

/// One opinion word found in a text, after intensifiers and negation.
#[derive(Clone, Debug, PartialEq)]
pub struct Assessment<'a> {
    pub word: &'a str,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Pattern-style subjectivity model over a word lexicon.
///
/// The lexicon is a tab-separated table with `word`, `polarity`,
/// `subjectivity` and an optional `intensity` column. Words whose intensity
/// is not `1.0` act as intensifiers when a lexicon word follows them and are
/// assessed as ordinary words otherwise.
///
/// Each lexicon word found in the text is assessed; a preceding intensifier
/// scales it and a negation within [`NEGATION_WINDOW`] words flips and damps
/// its polarity. Subjectivity of the text is the mean of the assessments.
#[derive(Clone, Debug, Default)]
pub struct SubjectivityModel {
    words: HashMap<String, (f64, f64)>,
    intensifiers: HashMap<String, f64>,
}

impl SubjectivityModel {
    /// Load a lexicon table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SubjectivityError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SubjectivityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_reader(file)?;
        info!(
            "loaded {} subjectivity words ({} intensifiers) from {}",
            model.words.len(),
            model.intensifiers.len(),
            path.display()
        );
        Ok(model)
    }

    /// Parse a tab-separated lexicon table.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SubjectivityError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut model = Self::default();
        for (idx, row) in reader.deserialize::<Row>().enumerate() {
            let row = row?;
            if row.word.is_empty() {
                return Err(SubjectivityError::EmptyWord(idx + 1));
            }
            model.insert(&row.word, row.polarity, row.subjectivity, row.intensity);
        }
        if model.words.is_empty() {
            return Err(SubjectivityError::Empty);
        }
        Ok(model)
    }

    /// Add or override `(word, polarity, subjectivity)` entries.
    ///
    /// Words are lowercased; scores are clamped to their valid ranges.
    pub fn with_words<I, W>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = (W, f64, f64)>,
        W: AsRef<str>,
    {
        for (word, polarity, subjectivity) in words {
            self.insert(word.as_ref(), polarity, subjectivity, 1.0);
        }
        self
    }

    fn insert(&mut self, word: &str, polarity: f64, subjectivity: f64, intensity: f64) {
        let word = word.to_lowercase();
        if (intensity - 1.0).abs() > f64::EPSILON {
            self.intensifiers.insert(word.clone(), intensity.max(0.0));
        } else {
            self.intensifiers.remove(&word);
        }
        self.words.insert(
            word,
            (polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)),
        );
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn intensifier_count(&self) -> usize {
        self.intensifiers.len()
    }

    /// Assess every lexicon word in `text`, in order of occurrence.
    pub fn assess<'t>(&self, text: &'t str) -> Vec<Assessment<'t>> {
        let tokens: Vec<(&'t str, String)> = text
            .unicode_words()
            .map(|word| (word, word.to_lowercase()))
            .collect();

        let mut out = Vec::new();
        let mut negation_left = 0usize;
        let mut boost = 1.0f64;
        for (idx, (word, lower)) in tokens.iter().enumerate() {
            if is_negation(lower) {
                negation_left = NEGATION_WINDOW;
                continue;
            }

            if let Some(factor) = self.intensifiers.get(lower.as_str())
                && tokens
                    .get(idx + 1)
                    .is_some_and(|(_, next)| self.words.contains_key(next.as_str()))
            {
                boost *= factor;
                continue;
            }

            if let Some((polarity, subjectivity)) = self.words.get(lower.as_str()) {
                let mut polarity = polarity * boost;
                if negation_left > 0 {
                    polarity *= NEGATION_FACTOR;
                }
                out.push(Assessment {
                    word: *word,
                    polarity: polarity.clamp(-1.0, 1.0),
                    subjectivity: (subjectivity * boost).clamp(0.0, 1.0),
                });
                negation_left = 0;
            } else {
                negation_left = negation_left.saturating_sub(1);
            }
            boost = 1.0;
        }
        out
    }

    /// Subjectivity of `text` in `[0, 1]`; `0.0` when no word is assessed.
    pub fn subjectivity(&self, text: &str) -> f64 {
        let assessments = self.assess(text);
        if assessments.is_empty() {
            return 0.0;
        }
        let sum: f64 = assessments.iter().map(|a| a.subjectivity).sum();
        (sum / assessments.len() as f64).clamp(0.0, 1.0)
    }
}

fn is_negation(lower: &str) -> bool {
    NEGATIONS.contains(&lower) || lower.ends_with("n't")
}
