use super::domain::Submission;
use crate::config::DEFAULT_MAX_CORPUS_CHARS;
use std::collections::HashMap;
use tracing::warn;

/// Normalized text and length metrics for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFeatures {
    pub corpus: String,
    pub char_length: usize,
    pub word_count: usize,
    /// Character count before the corpus cap was applied, when it was.
    pub truncated_from: Option<usize>,
    term_counts: HashMap<String, usize>,
}

impl TextFeatures {
    pub fn from_corpus(corpus: &str) -> Self {
        let corpus = corpus.trim().to_string();
        let mut term_counts = HashMap::new();
        for token in tokenize(&corpus) {
            *term_counts.entry(token).or_insert(0) += 1;
        }

        Self {
            char_length: corpus.chars().count(),
            word_count: corpus.split_whitespace().count(),
            corpus,
            truncated_from: None,
            term_counts,
        }
    }

    /// Whole-word, case-insensitive occurrences of `term`.
    pub fn occurrences(&self, term: &str) -> usize {
        self.term_counts
            .get(&term.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.char_length == 0
    }
}

/// Flattens submission fields into a single capped corpus.
#[derive(Debug, Clone, Copy)]
pub struct TextFeatureExtractor {
    max_chars: usize,
}

impl Default for TextFeatureExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CORPUS_CHARS)
    }
}

impl TextFeatureExtractor {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    pub fn extract(&self, submission: &Submission) -> TextFeatures {
        let joined = submission
            .fields
            .values()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let original_chars = joined.chars().count();
        if original_chars <= self.max_chars {
            return TextFeatures::from_corpus(&joined);
        }

        let cut = joined
            .char_indices()
            .nth(self.max_chars)
            .map(|(index, _)| index)
            .unwrap_or(joined.len());
        warn!(
            subcomponent = %submission.subcomponent_id,
            original_chars,
            kept_chars = self.max_chars,
            "submission corpus truncated"
        );

        let mut features = TextFeatures::from_corpus(&joined[..cut]);
        features.truncated_from = Some(original_chars);
        features
    }
}

/// Lowercase alphanumeric runs; everything else separates words.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_fields_in_name_order_and_trims() {
        let submission = Submission::new("value-proposition")
            .with_field("b_second", "  world ")
            .with_field("a_first", "hello")
            .with_field("c_blank", "   ");

        let features = TextFeatureExtractor::default().extract(&submission);

        assert_eq!(features.corpus, "hello world");
        assert_eq!(features.char_length, 11);
        assert_eq!(features.word_count, 2);
        assert!(features.truncated_from.is_none());
    }

    #[test]
    fn empty_submission_is_valid() {
        let features = TextFeatureExtractor::default().extract(&Submission::new("x"));
        assert!(features.is_empty());
        assert_eq!(features.word_count, 0);
    }

    #[test]
    fn counts_whole_words_case_insensitively() {
        let features = TextFeatures::from_corpus("Evidence, evidence! Evidenced EVIDENCE-based");
        assert_eq!(features.occurrences("evidence"), 3);
        assert_eq!(features.occurrences("Evidence"), 3);
        assert_eq!(features.occurrences("evidenced"), 1);
    }

    #[test]
    fn caps_corpus_on_char_boundary() {
        let submission = Submission::new("x").with_field("notes", "ééééé ééééé");
        let features = TextFeatureExtractor::new(4).extract(&submission);

        assert_eq!(features.corpus, "éééé");
        assert_eq!(features.char_length, 4);
        assert_eq!(features.truncated_from, Some(11));
    }
}
