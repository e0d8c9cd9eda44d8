use super::ClusterId;
use crate::corpus::DocId;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("Unknown document: {0}")]
    UnknownDocument(DocId),

    #[error("Unknown or empty cluster: {0}")]
    UnknownCluster(ClusterId),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Document {0} appears more than once in the result set")]
    DuplicateDocument(DocId),

    #[error("Cluster {cluster} has no members after round {round}")]
    EmptyCluster { cluster: ClusterId, round: usize },

    #[error("Clustering cancelled after {rounds} rounds")]
    Cancelled { rounds: usize },

    #[error("Time budget of {budget:?} exceeded after {rounds} rounds")]
    TimeBudgetExceeded { rounds: usize, budget: Duration },
}
