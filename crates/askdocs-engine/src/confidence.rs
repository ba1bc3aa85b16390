use crate::ranker::RankedPassage;

pub const CONFIDENCE_FLOOR: f32 = 0.1;
pub const CONFIDENCE_CEILING: f32 = 0.95;

const BASE: f32 = 0.5;
const SIMILARITY_WEIGHT: f32 = 0.3;
const ENTITY_WEIGHT: f32 = 0.2;
const LENGTH_BONUS: f32 = 0.1;
const LENGTH_BONUS_CHARS: usize = 100;

/// Presentation hint in `[0.1, 0.95]` for an answer built from `passages`.
///
/// Without passages the answer is the no-information message and the hint is
/// the floor. A query without entities contributes nothing for entities.
pub fn confidence(passages: &[RankedPassage], entities: &[String], answer: &str) -> f32 {
    if passages.is_empty() {
        return CONFIDENCE_FLOOR;
    }
    let mean_similarity =
        passages.iter().map(|p| p.similarity.clamp(0.0, 1.0)).sum::<f32>() / passages.len() as f32;
    let entity_share = if entities.is_empty() {
        0.0
    } else {
        entities.iter().filter(|e| answer.contains(e.as_str())).count() as f32 / entities.len() as f32
    };
    let length_bonus = if answer.chars().count() > LENGTH_BONUS_CHARS && !answer.contains("couldn't find") {
        LENGTH_BONUS
    } else {
        0.0
    };
    let score = BASE + SIMILARITY_WEIGHT * mean_similarity + ENTITY_WEIGHT * entity_share + length_bonus;
    score.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}
