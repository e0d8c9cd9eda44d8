// Public API exports
pub mod clusterer;
pub mod corpus;
pub mod features;

// Re-export main types for convenience
pub use corpus::{DocId, InMemoryCorpus, ResultSet, TermStatistics};

pub use features::{FeatureVector, FeatureVectorBuilder, FeatureVectors, TfIdf};

pub use clusterer::{
    ClusterAssignment, ClusterError, ClusterId, ClusterReport, ClusteringAlgorithm, DotProduct,
    EmptyClusterPolicy, KMeans, KMeansConfig, NormalizedCosine, SelectionRule, SimilarityMetric,
    StoppingRule,
};
