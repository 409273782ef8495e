use num::ToPrimitive;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BuildError, SnapshotError},
    vectorizer::FeatureVector,
};

/// Cosine similarity between two count vectors.
///
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
///
/// Returns 0.0 when either vector has zero norm. Vectors of different length
/// never come out of one vocabulary, so that case is a
/// [`BuildError::DimensionMismatch`] with `row` 1, the position of `b`.
pub fn cosine<N>(a: &[N], b: &[N]) -> Result<f64, BuildError>
where
    N: ToPrimitive + Copy,
{
    if a.len() != b.len() {
        tracing::error!(expected = a.len(), found = b.len(), "cosine over vectors of different length");
        return Err(BuildError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
            row: 1,
        });
    }
    let mut dot = 0_f64;
    let mut norm_a = 0_f64;
    let mut norm_b = 0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let x = x.to_f64().unwrap_or(0.0);
        let y = y.to_f64().unwrap_or(0.0);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    Ok(normalized(dot, norm_a.sqrt() * norm_b.sqrt()))
}

/// dot / denom, 0.0 for a zero denominator, clamped to [-1.0, 1.0] against
/// rounding drift. Both the pairwise function and the matrix go through here.
#[inline]
fn normalized(dot: f64, denom: f64) -> f64 {
    if denom == 0.0 {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Exact integer dot product of two count vectors.
#[inline]
fn dot_counts(a: &[u32], b: &[u32]) -> u64 {
    a.iter().zip(b).map(|(&x, &y)| x as u64 * y as u64).sum()
}

/// Full pairwise similarity of `vectors` over a `dims`-term vocabulary.
/// See [`SimilarityMatrix::compute`].
pub fn compute_matrix(vectors: &[FeatureVector], dims: usize) -> Result<SimilarityMatrix, BuildError> {
    SimilarityMatrix::compute(vectors, dims)
}

/// Symmetric N×N cosine similarity matrix, stored row-major.
///
/// Diagonal policy: 1.0 for an item with nonzero norm, 0.0 for a zero-norm
/// item (the same fallback it gets against every other item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute every pairwise similarity of `vectors`, each of which must
    /// have exactly `dims` entries.
    ///
    /// O(N²·D). Rows of the upper triangle are computed in parallel and then
    /// mirrored, so `get(i, j) == get(j, i)` holds bit for bit.
    pub fn compute(vectors: &[FeatureVector], dims: usize) -> Result<Self, BuildError> {
        if let Some((row, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dims) {
            tracing::error!(row, expected = dims, found = v.len(), "feature vector dimension mismatch");
            return Err(BuildError::DimensionMismatch {
                expected: dims,
                found: v.len(),
                row,
            });
        }

        let n = vectors.len();
        let norms: Vec<f64> = vectors.par_iter().map(FeatureVector::norm).collect();

        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let a = vectors[i].as_slice();
                (i..n)
                    .map(|j| {
                        let denom = norms[i] * norms[j];
                        if i == j && denom != 0.0 {
                            1.0
                        } else {
                            normalized(dot_counts(a, vectors[j].as_slice()) as f64, denom)
                        }
                    })
                    .collect()
            })
            .collect();

        let mut values = vec![0.0; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, value) in row.into_iter().enumerate() {
                let j = i + offset;
                values[i * n + j] = value;
                values[j * n + i] = value;
            }
        }
        Ok(Self { n, values })
    }

    /// Check that deserialized values form an `n`×`n` matrix.
    pub(crate) fn validate(&self) -> Result<(), SnapshotError> {
        if self.values.len() != self.n * self.n {
            return Err(SnapshotError::Shape {
                items: self.n,
                found: self.values.len(),
                what: "similarity values",
            });
        }
        Ok(())
    }

    /// Number of items (rows)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity of items `i` and `j`. Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of range for {} items", self.n);
        self.values[i * self.n + j]
    }

    /// All similarities of item `i`, in corpus order.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(v: &[u32]) -> FeatureVector {
        FeatureVector::new(v.to_vec())
    }

    #[test]
    fn cosine_identical_and_orthogonal() {
        assert!((cosine(&[1u32, 2, 3], &[1, 2, 3]).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(cosine(&[1u32, 0], &[0, 1]).unwrap(), 0.0);
        assert!((cosine(&[1.0f64, 0.0], &[-1.0, 0.0]).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_zero_norm() {
        assert_eq!(cosine(&[0u32, 0], &[1, 2]).unwrap(), 0.0);
        assert_eq!(cosine::<u32>(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn cosine_length_mismatch_is_an_error() {
        assert_eq!(
            cosine(&[1u32], &[1, 2]).unwrap_err(),
            BuildError::DimensionMismatch { expected: 1, found: 2, row: 1 }
        );
    }

    #[test]
    fn matrix_agrees_with_pairwise_cosine() {
        let vectors = vec![fv(&[2, 1, 0, 4]), fv(&[1, 3, 1, 0]), fv(&[0, 0, 0, 0]), fv(&[5, 0, 2, 1])];
        let m = SimilarityMatrix::compute(&vectors, 4).unwrap();
        for i in 0..vectors.len() {
            for j in 0..vectors.len() {
                if i == j {
                    continue;
                }
                let expected = cosine(vectors[i].as_slice(), vectors[j].as_slice()).unwrap();
                assert!((m.get(i, j) - expected).abs() < 1e-12, "({i}, {j})");
            }
        }
    }

    #[test]
    fn matrix_diagonal_and_symmetry() {
        let vectors = vec![fv(&[1, 1, 0]), fv(&[0, 2, 1]), fv(&[3, 0, 0])];
        let m = SimilarityMatrix::compute(&vectors, 3).unwrap();
        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert_eq!(m.get(i, i), 1.0);
        }
        assert!(m.is_symmetric());
        let expected = cosine(vectors[0].as_slice(), vectors[1].as_slice()).unwrap();
        assert!((m.get(0, 1) - expected).abs() < 1e-12);
        assert_eq!(m.get(1, 2), 0.0);
    }

    #[test]
    fn zero_norm_item_scores_zero_everywhere() {
        let vectors = vec![fv(&[0, 0]), fv(&[1, 0])];
        let m = SimilarityMatrix::compute(&vectors, 2).unwrap();
        assert_eq!(m.row(0), &[0.0, 0.0]);
        assert_eq!(m.get(1, 0), 0.0);
        assert_eq!(m.get(1, 1), 1.0);
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let vectors = vec![fv(&[1, 0]), fv(&[1])];
        assert_eq!(
            SimilarityMatrix::compute(&vectors, 2).unwrap_err(),
            BuildError::DimensionMismatch { expected: 2, found: 1, row: 1 }
        );
    }

    #[test]
    fn empty_input() {
        let m = SimilarityMatrix::compute(&[], 4).unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn validate_checks_shape() {
        let ok: SimilarityMatrix = serde_json::from_str(r#"{"n": 2, "values": [1.0, 0.0, 0.0, 1.0]}"#).unwrap();
        assert!(ok.validate().is_ok());
        let short: SimilarityMatrix = serde_json::from_str(r#"{"n": 2, "values": [1.0]}"#).unwrap();
        assert!(matches!(
            short.validate(),
            Err(SnapshotError::Shape { items: 2, found: 1, what: "similarity values" })
        ));
    }
}
