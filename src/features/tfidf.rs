use super::{FeatureVector, FeatureVectorBuilder, FeatureVectors};
use crate::clusterer::ClusterError;
use crate::corpus::{ResultSet, TermStatistics};
use tracing::debug;

/// Term frequency / inverse document frequency weighting
///
/// weight(term, doc) = wdf(term, doc) * ln(N / df(term)), where N and df come
/// from the index statistics. Only terms occurring in a document get an entry.
pub struct TfIdf<S> {
    stats: S,
}

impl<S: TermStatistics> TfIdf<S> {
    pub fn new(stats: S) -> Self {
        Self { stats }
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    fn idf(&self, term: &str, n: u64) -> f64 {
        // df outside [1, N] means the statistics disagree with the termlist
        let df = self.stats.document_frequency(term).clamp(1, n.max(1));
        (n.max(1) as f64 / df as f64).ln()
    }
}

impl<S: TermStatistics> FeatureVectorBuilder for TfIdf<S> {
    fn build_feature_vectors(
        &self,
        result_set: &ResultSet,
    ) -> Result<FeatureVectors, ClusterError> {
        let n = self.stats.document_count();

        let vectors = result_set
            .iter()
            .map(|doc| {
                let termlist = self
                    .stats
                    .termlist(doc)
                    .ok_or(ClusterError::UnknownDocument(doc))?;
                let vector: FeatureVector = termlist
                    .into_iter()
                    .map(|(term, wdf)| {
                        let weight = wdf as f64 * self.idf(&term, n);
                        (term, weight)
                    })
                    .collect();
                Ok((doc, vector))
            })
            .collect::<Result<FeatureVectors, ClusterError>>()?;

        debug!(documents = vectors.len(), collection = n, "built tf-idf vectors");
        Ok(vectors)
    }
}
