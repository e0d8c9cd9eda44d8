mod store;
mod tfidf;
mod vector;


pub use store::FeatureVectors;
pub use tfidf::TfIdf;
pub use vector::FeatureVector;

use crate::clusterer::ClusterError;
use crate::corpus::ResultSet;

/// Turns a result set into one sparse feature vector per document
pub trait FeatureVectorBuilder: Send + Sync {
    /// Materialize the vectors of every document in `result_set`
    ///
    /// The returned store is complete and immutable; a document the builder
    /// cannot describe fails the whole build.
    fn build_feature_vectors(
        &self,
        result_set: &ResultSet,
    ) -> Result<FeatureVectors, ClusterError>;
}

impl<T: FeatureVectorBuilder + ?Sized> FeatureVectorBuilder for &T {
    fn build_feature_vectors(
        &self,
        result_set: &ResultSet,
    ) -> Result<FeatureVectors, ClusterError> {
        (**self).build_feature_vectors(result_set)
    }
}

impl<T: FeatureVectorBuilder + ?Sized> FeatureVectorBuilder for Box<T> {
    fn build_feature_vectors(
        &self,
        result_set: &ResultSet,
    ) -> Result<FeatureVectors, ClusterError> {
        (**self).build_feature_vectors(result_set)
    }
}

impl<T: FeatureVectorBuilder + ?Sized> FeatureVectorBuilder for std::sync::Arc<T> {
    fn build_feature_vectors(
        &self,
        result_set: &ResultSet,
    ) -> Result<FeatureVectors, ClusterError> {
        (**self).build_feature_vectors(result_set)
    }
}
