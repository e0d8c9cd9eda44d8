use crate::features::FeatureVector;
use std::cmp::Ordering;

/// Scores how alike two feature vectors are
pub trait SimilarityMetric: Send + Sync {
    fn similarity(&self, a: &FeatureVector, b: &FeatureVector) -> f64;
}

impl<T: SimilarityMetric + ?Sized> SimilarityMetric for &T {
    fn similarity(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        (**self).similarity(a, b)
    }
}

impl<T: SimilarityMetric + ?Sized> SimilarityMetric for Box<T> {
    fn similarity(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        (**self).similarity(a, b)
    }
}

impl<T: SimilarityMetric + ?Sized> SimilarityMetric for std::sync::Arc<T> {
    fn similarity(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        (**self).similarity(a, b)
    }
}

/// Unnormalized inner product of two sparse vectors
///
/// Self-similarity is the squared norm, not 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotProduct;

impl SimilarityMetric for DotProduct {
    fn similarity(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        dot_product(a, b)
    }
}

/// Dot product divided by both magnitudes
///
/// Zero when either vector has no weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedCosine;

impl SimilarityMetric for NormalizedCosine {
    fn similarity(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        let na = a.squared_norm();
        let nb = b.squared_norm();

        if na == 0.0 || nb == 0.0 {
            return 0.0;
        }

        dot_product(a, b) / (na.sqrt() * nb.sqrt())
    }
}

/// Merge-join over both ascending key sequences
pub fn dot_product(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let mut a_iter = a.iter().peekable();
    let mut b_iter = b.iter().peekable();
    let mut inner = 0.0;

    while let (Some(&(ka, wa)), Some(&(kb, wb))) = (a_iter.peek(), b_iter.peek()) {
        match ka.cmp(kb) {
            Ordering::Less => {
                a_iter.next();
            }
            Ordering::Greater => {
                b_iter.next();
            }
            Ordering::Equal => {
                inner += wa * wb;
                a_iter.next();
                b_iter.next();
            }
        }
    }

    inner
}
