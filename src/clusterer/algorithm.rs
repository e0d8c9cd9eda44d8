use super::{ClusterAssignment, ClusterError, ClusterReport};

/// A clustering algorithm over one result set
///
/// Implementations own their result set and assignment. `cluster` restarts
/// from the same initial conditions every time it is called; after an error
/// the assignment is left empty.
pub trait ClusteringAlgorithm {
    /// Run to completion and populate the assignment
    fn cluster(&mut self) -> Result<ClusterReport, ClusterError>;

    /// The assignment produced by the last successful `cluster` call
    fn results(&self) -> &ClusterAssignment;
}
