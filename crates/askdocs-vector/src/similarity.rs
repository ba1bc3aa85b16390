use std::borrow::Cow;

/// Cosine similarity between two vectors of equal length.
///
/// Returns 0.0 when the lengths differ or either vector has zero magnitude;
/// pad with [`pad_to_dimension`] first when comparing vectors built at
/// different vocabulary sizes.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

/// Zero-pad `vector` to `dimension`. Borrows when no padding is needed.
pub fn pad_to_dimension(vector: &[f32], dimension: usize) -> Cow<'_, [f32]> {
    if vector.len() >= dimension {
        return Cow::Borrowed(vector);
    }
    let mut padded = Vec::with_capacity(dimension);
    padded.extend_from_slice(vector);
    padded.resize(dimension, 0.0);
    Cow::Owned(padded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let v = [0.2, 0.0, 0.7];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn padding_keeps_prefix() {
        let padded = pad_to_dimension(&[1.0, 2.0], 4);
        assert_eq!(padded.as_ref(), &[1.0, 2.0, 0.0, 0.0]);
        assert!(matches!(pad_to_dimension(&[1.0], 1), Cow::Borrowed(_)));
    }
}
