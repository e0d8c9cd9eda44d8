use super::ClusterError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cluster identifier, in `0..cluster_count`
pub type ClusterId = u32;

/// Which centroid score wins during assignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// Most similar centroid (nearest for a similarity metric)
    #[default]
    Maximum,
    /// Least similar centroid
    Minimum,
}

impl SelectionRule {
    /// True when `candidate` beats `best` under this rule
    ///
    /// Ties never win, so the lowest cluster id keeps a tied score.
    pub(crate) fn prefers(self, candidate: f64, best: f64) -> bool {
        match self {
            SelectionRule::Maximum => candidate > best,
            SelectionRule::Minimum => candidate < best,
        }
    }
}

/// What to do with a cluster that ends an assignment round without members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyClusterPolicy {
    /// Abort the run with [`ClusterError::EmptyCluster`]
    Fail,
    /// Keep the centroid from the previous round
    #[default]
    RetainPrevious,
    /// Move the document that scores worst against its own centroid, taken
    /// from a cluster with at least two members, into the empty cluster
    ///
    /// This is not "farthest from every centroid": only the document's own
    /// centroid is scored.
    ReseedWorstFit,
}

/// When to stop iterating
///
/// `max_iterations` is always an upper bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StoppingRule {
    /// Run exactly `max_iterations` rounds
    #[default]
    FixedIterations,
    /// Stop after the first round whose total centroid movement is at most
    /// `threshold`
    CentroidShift { threshold: f64 },
}

/// Parameters for a k-means run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    pub cluster_count: u32,
    pub max_iterations: usize,
    pub selection: SelectionRule,
    pub empty_cluster: EmptyClusterPolicy,
    pub stopping: StoppingRule,
    /// Spread assignment and centroid rounds over the rayon pool
    pub parallel: bool,
    /// Wall-clock budget, checked between rounds
    pub time_budget: Option<Duration>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            cluster_count: 2,
            max_iterations: 10,
            selection: SelectionRule::default(),
            empty_cluster: EmptyClusterPolicy::default(),
            stopping: StoppingRule::default(),
            parallel: false,
            time_budget: None,
        }
    }
}

impl KMeansConfig {
    pub fn new(cluster_count: u32, max_iterations: usize) -> Self {
        Self {
            cluster_count,
            max_iterations,
            ..Self::default()
        }
    }

    pub fn selection(mut self, rule: SelectionRule) -> Self {
        self.selection = rule;
        self
    }

    pub fn empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }

    pub fn stopping(mut self, rule: StoppingRule) -> Self {
        self.stopping = rule;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Check the parameters on their own, without a result set
    pub fn validate(&self) -> Result<(), ClusterError> {
        if self.cluster_count == 0 {
            return Err(ClusterError::InvalidConfiguration(
                "cluster_count must be positive".to_string(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(ClusterError::InvalidConfiguration(
                "max_iterations must be positive".to_string(),
            ));
        }

        if let StoppingRule::CentroidShift { threshold } = self.stopping {
            if threshold.is_nan() || threshold < 0.0 {
                return Err(ClusterError::InvalidConfiguration(format!(
                    "centroid shift threshold must be a non-negative number, got {}",
                    threshold
                )));
            }
        }

        Ok(())
    }

    /// Check the parameters against a result set of `documents` entries
    pub fn validate_for(&self, documents: usize) -> Result<(), ClusterError> {
        self.validate()?;

        if self.cluster_count as usize > documents {
            return Err(ClusterError::InvalidConfiguration(format!(
                "cluster_count {} exceeds result set size {}",
                self.cluster_count, documents
            )));
        }

        Ok(())
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterReport {
    /// Assignment/update rounds performed
    pub rounds: usize,
    /// True when the centroid-shift rule stopped the run early
    pub converged: bool,
    /// Total centroid movement in the last round
    pub last_shift: f64,
}
