use super::FeatureVector;
use crate::clusterer::ClusterError;
use crate::corpus::DocId;
use std::collections::HashMap;

/// Immutable docid -> feature vector map produced by a builder
#[derive(Debug, Clone, Default)]
pub struct FeatureVectors {
    vectors: HashMap<DocId, FeatureVector>,
}

impl FeatureVectors {
    /// Look up the vector built for `doc`
    pub fn get(&self, doc: DocId) -> Result<&FeatureVector, ClusterError> {
        self.vectors
            .get(&doc)
            .ok_or(ClusterError::UnknownDocument(doc))
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl FromIterator<(DocId, FeatureVector)> for FeatureVectors {
    fn from_iter<I: IntoIterator<Item = (DocId, FeatureVector)>>(iter: I) -> Self {
        Self {
            vectors: iter.into_iter().collect(),
        }
    }
}
