use super::domain::DimensionScore;
use super::features::{tokenize, TextFeatures};
use super::noise::Noise;
use super::rubric::Dimension;
use tracing::trace;

/// Strategy for turning a corpus into one dimension's score.
///
/// Implementations must keep `0 <= raw_score <= dimension.weight`; aggregation and
/// recommendations rely on it.
pub trait DimensionScorer: Send + Sync {
    fn score(&self, dimension: &Dimension, features: &TextFeatures, noise: &mut Noise)
        -> DimensionScore;
}

/// Function words long enough to survive the length filter.
const STOPWORDS: [&str; 16] = [
    "about", "above", "after", "again", "being", "below", "could", "every", "other", "should",
    "their", "there", "these", "those", "which", "would",
];

const MIN_KEYWORD_CHARS: usize = 5;
const MAX_DESCRIPTION_KEYWORDS: usize = 5;

const LENGTH_THRESHOLDS: [usize; 3] = [500, 1000, 1500];
const LENGTH_STEP_POINTS: u32 = 5;
const WORD_THRESHOLDS: [(usize, u32); 2] = [(100, 3), (200, 2)];
const KEYWORD_POINTS: u32 = 2;
const KEYWORD_CAP: u32 = 10;
const JITTER_SPREAD: i64 = 2;
const FLOOR_MIN_CHARS: usize = 50;
const FLOOR_SCORE: u32 = 10;
const FLOOR_CEILING: u32 = 12;

/// Length, word-count, and keyword heuristic with bounded jitter.
///
/// Deliberately naive; swap in another [`DimensionScorer`] for real text analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn length_bonus(char_length: usize) -> u32 {
        LENGTH_THRESHOLDS
            .iter()
            .filter(|threshold| char_length > **threshold)
            .count() as u32
            * LENGTH_STEP_POINTS
    }

    pub fn word_bonus(word_count: usize) -> u32 {
        WORD_THRESHOLDS
            .iter()
            .filter(|(threshold, _)| word_count > *threshold)
            .map(|(_, points)| points)
            .sum()
    }

    pub fn keyword_bonus(matches: usize) -> u32 {
        let matches = u32::try_from(matches).unwrap_or(u32::MAX);
        matches.saturating_mul(KEYWORD_POINTS).min(KEYWORD_CAP)
    }
}

impl DimensionScorer for HeuristicScorer {
    fn score(
        &self,
        dimension: &Dimension,
        features: &TextFeatures,
        noise: &mut Noise,
    ) -> DimensionScore {
        let keyword_matches: usize = dimension_keywords(dimension)
            .iter()
            .map(|keyword| features.occurrences(keyword))
            .sum();

        let base = Self::length_bonus(features.char_length)
            + Self::word_bonus(features.word_count)
            + Self::keyword_bonus(keyword_matches);

        let jittered = i64::from(base) + noise.jitter(JITTER_SPREAD);
        let mut raw_score = jittered.clamp(0, i64::from(dimension.weight)) as u32;

        if features.char_length > FLOOR_MIN_CHARS && raw_score < FLOOR_SCORE {
            raw_score = noise
                .pick(FLOOR_SCORE, FLOOR_CEILING)
                .min(dimension.weight);
        }

        trace!(
            dimension = %dimension.name,
            keyword_matches,
            base,
            raw_score,
            "scored dimension"
        );

        DimensionScore::new(
            &dimension.name,
            &dimension.description,
            raw_score,
            dimension.weight,
        )
    }
}

/// Name tokens plus up to five description tokens, skipping short and function words.
pub fn dimension_keywords(dimension: &Dimension) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for token in tokenize(&dimension.name).filter(|token| is_keyword(token)) {
        if !keywords.contains(&token) {
            keywords.push(token);
        }
    }

    let mut taken = 0;
    for token in tokenize(&dimension.description).filter(|token| is_keyword(token)) {
        if taken == MAX_DESCRIPTION_KEYWORDS {
            break;
        }
        if !keywords.contains(&token) {
            keywords.push(token);
            taken += 1;
        }
    }

    keywords
}

fn is_keyword(token: &str) -> bool {
    token.chars().count() >= MIN_KEYWORD_CHARS && !STOPWORDS.contains(&token)
}
