//! Distance functions for vector comparison.
//!
//! Distance functions are string tags carried on a schema's vector fields
//! (see [`functions`]); a missing tag defaults to cosine similarity. The
//! three operations here must stay mutually consistent: after
//! [`convert_score`] is applied, the order implied by
//! [`should_sort_descending`] puts the most similar record first.
//!
//! Cosine distance is not computed independently: both cosine variants go
//! through the cosine-similarity primitive and the distance variant is
//! converted afterward (`1 - score`).

use crate::error::{VectorStoreError, VectorStoreResult};

/// Well-known distance function tags.
pub mod functions {
    /// Cosine of the angle between the vectors (higher = more similar).
    pub const COSINE_SIMILARITY: &str = "CosineSimilarity";
    /// `1 - cosine similarity` (lower = more similar).
    pub const COSINE_DISTANCE: &str = "CosineDistance";
    /// Raw dot product (higher = more similar).
    pub const DOT_PRODUCT_SIMILARITY: &str = "DotProductSimilarity";
    /// L2 distance (lower = more similar).
    pub const EUCLIDEAN_DISTANCE: &str = "EuclideanDistance";
}

/// Resolved distance function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DistanceKind {
    #[default]
    CosineSimilarity,
    CosineDistance,
    DotProductSimilarity,
    EuclideanDistance,
}

impl DistanceKind {
    /// Resolve a tag; `None` defaults to cosine similarity.
    fn resolve(function: Option<&str>) -> VectorStoreResult<Self> {
        match function {
            None => Ok(DistanceKind::CosineSimilarity),
            Some(functions::COSINE_SIMILARITY) => Ok(DistanceKind::CosineSimilarity),
            Some(functions::COSINE_DISTANCE) => Ok(DistanceKind::CosineDistance),
            Some(functions::DOT_PRODUCT_SIMILARITY) => Ok(DistanceKind::DotProductSimilarity),
            Some(functions::EUCLIDEAN_DISTANCE) => Ok(DistanceKind::EuclideanDistance),
            Some(other) => Err(VectorStoreError::UnsupportedDistanceFunction {
                name: other.to_string(),
            }),
        }
    }
}

/// Compare two equal-length vectors under the given distance function.
///
/// Returns the raw score; callers that need the cosine-distance form must
/// pass the result through [`convert_score`]. A zero-magnitude operand under
/// the cosine functions yields NaN, which sorts last in either direction.
pub fn compare_vectors(x: &[f32], y: &[f32], function: Option<&str>) -> VectorStoreResult<f64> {
    if x.len() != y.len() {
        return Err(VectorStoreError::DimensionMismatch {
            expected: x.len(),
            got: y.len(),
        });
    }
    match DistanceKind::resolve(function)? {
        DistanceKind::CosineSimilarity | DistanceKind::CosineDistance => Ok(cosine_similarity(x, y)),
        DistanceKind::DotProductSimilarity => Ok(dot(x, y)),
        DistanceKind::EuclideanDistance => Ok(euclidean_distance(x, y)),
    }
}

/// Whether results should be ordered descending (higher = closer) for the
/// given distance function.
pub fn should_sort_descending(function: Option<&str>) -> VectorStoreResult<bool> {
    match DistanceKind::resolve(function)? {
        DistanceKind::CosineSimilarity | DistanceKind::DotProductSimilarity => Ok(true),
        DistanceKind::CosineDistance | DistanceKind::EuclideanDistance => Ok(false),
    }
}

/// Convert a raw comparison score into the requested distance function's
/// result. Cosine distance is derived from the cosine-similarity primitive;
/// every other function passes through unchanged.
pub fn convert_score(score: f64, function: Option<&str>) -> VectorStoreResult<f64> {
    match DistanceKind::resolve(function)? {
        DistanceKind::CosineDistance => Ok(1.0 - score),
        DistanceKind::CosineSimilarity
        | DistanceKind::DotProductSimilarity
        | DistanceKind::EuclideanDistance => Ok(score),
    }
}

fn dot(x: &[f32], y: &[f32]) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| *a as f64 * *b as f64)
        .sum()
}

fn cosine_similarity(x: &[f32], y: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_x = 0.0f64;
    let mut norm_y = 0.0f64;
    for (a, b) in x.iter().zip(y.iter()) {
        let (a, b) = (*a as f64, *b as f64);
        dot += a * b;
        norm_x += a * a;
        norm_y += b * b;
    }
    dot / (norm_x.sqrt() * norm_y.sqrt())
}

fn euclidean_distance(x: &[f32], y: &[f32]) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| {
            let d = *a as f64 - *b as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
