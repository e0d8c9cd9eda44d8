use std::collections::BTreeMap;

/// Sparse term -> weight vector
///
/// Keys iterate in ascending order, which the merge-based similarity and
/// distance computations rely on. Absent terms have weight zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    weights: BTreeMap<String, f64>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight of `term`, zero when absent
    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.weights.contains_key(term)
    }

    pub fn insert(&mut self, term: impl Into<String>, weight: f64) {
        self.weights.insert(term.into(), weight);
    }

    /// Add `weight` to the current weight of `term`
    pub fn accumulate(&mut self, term: &str, weight: f64) {
        match self.weights.get_mut(term) {
            Some(w) => *w += weight,
            None => {
                self.weights.insert(term.to_string(), weight);
            }
        }
    }

    /// Divide every weight by `divisor`
    pub fn scale_down(&mut self, divisor: f64) {
        for w in self.weights.values_mut() {
            *w /= divisor;
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Entries in ascending term order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(t, &w)| (t.as_str(), w))
    }

    /// Sum of squared weights
    pub fn squared_norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum()
    }

    /// Squared Euclidean distance, walking both key sequences once
    pub fn squared_distance(&self, other: &FeatureVector) -> f64 {
        let mut a = self.weights.iter().peekable();
        let mut b = other.weights.iter().peekable();
        let mut sum = 0.0;

        loop {
            let d = match (a.peek(), b.peek()) {
                (Some(&(ka, &wa)), Some(&(kb, &wb))) => match ka.cmp(kb) {
                    std::cmp::Ordering::Less => {
                        a.next();
                        wa
                    }
                    std::cmp::Ordering::Greater => {
                        b.next();
                        wb
                    }
                    std::cmp::Ordering::Equal => {
                        a.next();
                        b.next();
                        wa - wb
                    }
                },
                (Some(&(_, &wa)), None) => {
                    a.next();
                    wa
                }
                (None, Some(&(_, &wb))) => {
                    b.next();
                    wb
                }
                (None, None) => break,
            };
            sum += d * d;
        }

        sum
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(k, w)| (k.into(), w)).collect(),
        }
    }
}
