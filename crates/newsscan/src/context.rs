use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;
use ticker_lexicon::{DEFAULT_STOP_WORDS, EntityMatcher, Lexicon, LexiconError, LoadMode};
use ticker_sentiment::{SentimentScorer, SubjectivityError, SubjectivityModel};
use ticker_types::{EntitySpan, PolarizingPair, SentimentResult};
use tracing::info;

use crate::mentions::{MentionError, MentionTable, count_mentions};
use crate::report::ArticleReport;

pub const DEFAULT_LEXICON: &str = "data/stocks.tsv";
pub const DEFAULT_SUBJECTIVITY: &str = "data/subjectivity.tsv";

/// Startup settings for [`CoreContext`].
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub lexicon_path: PathBuf,
    pub load_mode: LoadMode,
    pub subjectivity_path: PathBuf,
    pub stop_words: Vec<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            lexicon_path: PathBuf::from(DEFAULT_LEXICON),
            load_mode: LoadMode::Mmap,
            subjectivity_path: PathBuf::from(DEFAULT_SUBJECTIVITY),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
    #[error(transparent)]
    Subjectivity(#[from] SubjectivityError),
}

/// Immutable lexicon, matcher and sentiment models shared by every request.
pub struct CoreContext {
    lexicon: Lexicon,
    matcher: EntityMatcher,
    scorer: SentimentScorer,
}

/// Load both lexicons and build every model once.
pub fn initialize(config: &CoreConfig) -> Result<CoreContext, InitError> {
    let start = Instant::now();
    let lexicon = Lexicon::load_with_mode(&config.lexicon_path, config.load_mode)?;
    let subjectivity = SubjectivityModel::load(&config.subjectivity_path)?;
    let ctx = CoreContext::new(lexicon, subjectivity, config.stop_words.as_slice())?;
    info!(
        "core context ready in {} ms ({} patterns)",
        start.elapsed().as_millis(),
        ctx.matcher.pattern_count()
    );
    Ok(ctx)
}

impl CoreContext {
    pub fn new<S: AsRef<str>>(
        lexicon: Lexicon,
        subjectivity: SubjectivityModel,
        stop_words: &[S],
    ) -> Result<Self, LexiconError> {
        let matcher = EntityMatcher::new(&lexicon, stop_words)?;
        Ok(Self {
            lexicon,
            matcher,
            scorer: SentimentScorer::new(subjectivity),
        })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn find_entities<'t>(&self, text: &'t str) -> Vec<EntitySpan<'t>> {
        self.matcher.find(text)
    }

    /// Ranked mentions of lexicon companies; `Ok(None)` when nothing matched.
    pub fn count_mentions(&self, text: &str) -> Result<Option<MentionTable>, MentionError> {
        let spans = self.matcher.find(text);
        count_mentions(&spans, &self.lexicon)
    }

    pub fn score_sentiment(&self, text: &str) -> SentimentResult {
        self.scorer.score(text)
    }

    pub fn polarizing_sentences<'t>(&self, text: &'t str) -> PolarizingPair<'t> {
        self.scorer.polarizing_sentences(text)
    }

    /// Mentions, sentiment and polarizing sentences of one text.
    pub fn analyze<'t>(&self, text: &'t str) -> Result<ArticleReport<'t>, MentionError> {
        Ok(ArticleReport {
            text,
            mentions: self.count_mentions(text)?,
            sentiment: self.score_sentiment(text),
            polarizing: self.polarizing_sentences(text),
        })
    }
}
