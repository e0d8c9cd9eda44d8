mod algorithm;
mod assignment;
mod centroid;
mod error;
mod kmeans;
mod similarity;
mod types;


pub use algorithm::ClusteringAlgorithm;
pub use assignment::{AssignmentWriter, ClusterAssignment};
pub use centroid::compute_centroid;
pub use error::ClusterError;
pub use kmeans::KMeans;
pub use similarity::{DotProduct, NormalizedCosine, SimilarityMetric, dot_product};
pub use types::{
    ClusterId, ClusterReport, EmptyClusterPolicy, KMeansConfig, SelectionRule, StoppingRule,
};
