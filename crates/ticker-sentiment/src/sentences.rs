use unicode_segmentation::UnicodeSegmentation;

/// Split `text` into trimmed, non-empty sentences with their byte offsets.
///
/// Boundaries follow UAX #29, so an abbreviation followed by a lowercase word
/// (`Apple Inc. shares`) does not end a sentence.
pub fn split_sentences(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    text.split_sentence_bound_indices()
        .filter_map(|(start, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            let lead = raw.len() - raw.trim_start().len();
            Some((start + lead, trimmed))
        })
}
