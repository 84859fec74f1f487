pub mod context;
pub mod handlers;
pub mod mentions;
pub mod report;

pub use context::{
    CoreConfig, CoreContext, DEFAULT_LEXICON, DEFAULT_SUBJECTIVITY, InitError, initialize,
};
pub use handlers::{AppState, router};
pub use mentions::{MentionCount, MentionError, MentionTable, count_mentions};
pub use report::{ArticleReport, compose_article};
