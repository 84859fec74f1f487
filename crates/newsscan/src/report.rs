use ticker_types::{PolarizingPair, SentimentResult};

use crate::mentions::{MentionCount, MentionTable};

/// Everything computed for one article text.
#[derive(Clone, Debug, PartialEq)]
pub struct ArticleReport<'t> {
    pub text: &'t str,
    pub mentions: Option<MentionTable>,
    pub sentiment: SentimentResult,
    pub polarizing: PolarizingPair<'t>,
}

impl ArticleReport<'_> {
    /// The most mentioned company, if any company was mentioned.
    pub fn main_mention(&self) -> Option<&MentionCount> {
        self.mentions.as_ref().and_then(MentionTable::main)
    }
}

/// Join a headline and body into the single text that gets analysed.
///
/// The headline becomes the first sentence; a period is added unless it
/// already ends in terminal punctuation.
pub fn compose_article(title: &str, body: &str) -> String {
    let title = title.trim();
    let body = body.trim();
    if title.is_empty() {
        return body.to_string();
    }
    if body.is_empty() {
        return title.to_string();
    }
    let separator = if title.ends_with(['.', '!', '?']) {
        " "
    } else {
        ". "
    };
    format!("{title}{separator}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_becomes_first_sentence() {
        assert_eq!(
            compose_article("Apple shares rise", "Investors cheered."),
            "Apple shares rise. Investors cheered."
        );
        assert_eq!(
            compose_article("Is the rally over?", "Analysts disagree."),
            "Is the rally over? Analysts disagree."
        );
    }

    #[test]
    fn missing_parts_are_dropped() {
        assert_eq!(compose_article("  ", "Body only."), "Body only.");
        assert_eq!(compose_article("Title only", ""), "Title only");
    }
}
