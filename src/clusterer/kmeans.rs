use crate::clusterer::{
    ClusterAssignment, ClusterError, ClusterId, ClusterReport, ClusteringAlgorithm,
    EmptyClusterPolicy, KMeansConfig, SelectionRule, SimilarityMetric, StoppingRule,
    centroid::compute_centroid,
};
use crate::corpus::{DocId, ResultSet};
use crate::features::{FeatureVector, FeatureVectorBuilder, FeatureVectors};
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Lloyd-style k-means over sparse feature vectors
///
/// Seeds centroids from the first `cluster_count` documents of the result set,
/// then alternates assignment and centroid-update rounds until the stopping
/// rule fires. Feature vectors are built on the first `cluster` call and
/// reused afterwards.
pub struct KMeans<M, B> {
    result_set: ResultSet,
    config: KMeansConfig,
    metric: M,
    builder: B,
    vectors: Option<FeatureVectors>,
    /// Centroids after the last completed round; empty until a run succeeds
    centroids: Vec<FeatureVector>,
    results: ClusterAssignment,
    cancel: Option<Arc<AtomicBool>>,
}

impl<M: SimilarityMetric, B: FeatureVectorBuilder> KMeans<M, B> {
    /// Fails with `InvalidConfiguration` when the parameters are out of range
    /// or ask for more clusters than there are documents.
    pub fn new(
        result_set: ResultSet,
        config: KMeansConfig,
        metric: M,
        builder: B,
    ) -> Result<Self, ClusterError> {
        config.validate_for(result_set.len())?;

        Ok(Self {
            results: ClusterAssignment::new(config.cluster_count),
            result_set,
            config,
            metric,
            builder,
            vectors: None,
            centroids: Vec::new(),
            cancel: None,
        })
    }

    /// Abort between rounds once `flag` is set
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    pub fn result_set(&self) -> &ResultSet {
        &self.result_set
    }

    /// Feature vectors, once the first `cluster` call has built them
    pub fn feature_vectors(&self) -> Option<&FeatureVectors> {
        self.vectors.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn centroids(&self) -> &[FeatureVector] {
        &self.centroids
    }

    fn run(&mut self, vectors: &FeatureVectors) -> Result<ClusterReport, ClusterError> {
        let started = Instant::now();
        self.results.writer().reset();
        self.centroids.clear();

        let mut centroids = self.init_centroids(vectors)?;
        let mut report = ClusterReport {
            rounds: 0,
            converged: false,
            last_shift: 0.0,
        };

        for round in 0..self.config.max_iterations {
            self.check_budget(round, started)?;

            self.assign_centroids(vectors, &centroids)?;
            let shift = self.compute_centroids(vectors, &mut centroids, round)?;

            report.rounds = round + 1;
            report.last_shift = shift;
            debug!(round, shift, "k-means round complete");

            if let StoppingRule::CentroidShift { threshold } = self.config.stopping {
                if shift <= threshold {
                    report.converged = true;
                    break;
                }
            }
        }

        self.centroids = centroids;

        info!(
            documents = self.result_set.len(),
            clusters = self.config.cluster_count,
            rounds = report.rounds,
            converged = report.converged,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "k-means finished"
        );
        Ok(report)
    }

    fn check_budget(&self, rounds: usize, started: Instant) -> Result<(), ClusterError> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(ClusterError::Cancelled { rounds });
            }
        }

        if let Some(budget) = self.config.time_budget {
            if started.elapsed() >= budget {
                return Err(ClusterError::TimeBudgetExceeded { rounds, budget });
            }
        }

        Ok(())
    }

    /// Copy the vectors of the first `cluster_count` documents
    fn init_centroids(&self, vectors: &FeatureVectors) -> Result<Vec<FeatureVector>, ClusterError> {
        self.result_set
            .iter()
            .take(self.config.cluster_count as usize)
            .map(|doc| vectors.get(doc).cloned())
            .collect()
    }

    fn assign_centroids(
        &mut self,
        vectors: &FeatureVectors,
        centroids: &[FeatureVector],
    ) -> Result<(), ClusterError> {
        let metric = &self.metric;
        let rule = self.config.selection;
        let choose = |doc: DocId| -> Result<ClusterId, ClusterError> {
            Ok(select_centroid(metric, rule, vectors.get(doc)?, centroids))
        };

        let docs = self.result_set.as_slice();
        let choices: Vec<ClusterId> = if self.config.parallel {
            docs.par_iter().map(|&doc| choose(doc)).collect::<Result<_, _>>()?
        } else {
            docs.iter().map(|&doc| choose(doc)).collect::<Result<_, _>>()?
        };

        let mut writer = self.results.writer();
        writer.clear_cluster_to_docs();
        for (&doc, cluster) in docs.iter().zip(choices) {
            writer.assign(doc, cluster);
        }

        Ok(())
    }

    /// Replace every centroid by the mean of its members
    ///
    /// Returns the summed Euclidean movement of all centroids.
    fn compute_centroids(
        &mut self,
        vectors: &FeatureVectors,
        centroids: &mut [FeatureVector],
        round: usize,
    ) -> Result<f64, ClusterError> {
        for cluster in 0..self.config.cluster_count {
            if self.results.members(cluster).is_empty() {
                self.handle_empty_cluster(vectors, centroids, cluster, round)?;
            }
        }

        let results = &self.results;
        let mean_of = |cluster: ClusterId| -> Result<Option<FeatureVector>, ClusterError> {
            let members = results
                .members(cluster)
                .iter()
                .map(|&doc| vectors.get(doc))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(compute_centroid(members))
        };

        let k = self.config.cluster_count;
        let updated: Vec<Option<FeatureVector>> = if self.config.parallel {
            (0..k).into_par_iter().map(mean_of).collect::<Result<_, _>>()?
        } else {
            (0..k).map(mean_of).collect::<Result<_, _>>()?
        };

        let mut shift = 0.0;
        for (centroid, new) in centroids.iter_mut().zip(updated) {
            // still empty: the previous centroid stays
            if let Some(new) = new {
                shift += centroid.squared_distance(&new).sqrt();
                *centroid = new;
            }
        }

        Ok(shift)
    }

    fn handle_empty_cluster(
        &mut self,
        vectors: &FeatureVectors,
        centroids: &[FeatureVector],
        cluster: ClusterId,
        round: usize,
    ) -> Result<(), ClusterError> {
        match self.config.empty_cluster {
            EmptyClusterPolicy::Fail => Err(ClusterError::EmptyCluster { cluster, round }),
            EmptyClusterPolicy::RetainPrevious => {
                warn!(cluster, round, "empty cluster keeps its previous centroid");
                Ok(())
            }
            EmptyClusterPolicy::ReseedWorstFit => {
                match self.worst_fitting_donor(vectors, centroids)? {
                    Some(doc) => {
                        warn!(cluster, round, doc, "empty cluster reseeded");
                        self.results.writer().move_doc(doc, cluster)
                    }
                    None => {
                        warn!(cluster, round, "no donor for empty cluster, keeping centroid");
                        Ok(())
                    }
                }
            }
        }
    }

    /// Document that fits its own centroid worst, taken only from clusters
    /// with at least two members
    fn worst_fitting_donor(
        &self,
        vectors: &FeatureVectors,
        centroids: &[FeatureVector],
    ) -> Result<Option<DocId>, ClusterError> {
        let rule = self.config.selection;
        let mut worst: Option<(DocId, f64)> = None;

        for doc in self.result_set.iter() {
            let own = self.results.get_cluster_by_doc(doc)?;
            if self.results.members(own).len() < 2 {
                continue;
            }

            let Some(centroid) = centroids.get(own as usize) else {
                continue;
            };
            let score = self.metric.similarity(centroid, vectors.get(doc)?);

            match worst {
                Some((_, w)) if !rule.prefers(w, score) => {}
                _ => worst = Some((doc, score)),
            }
        }

        Ok(worst.map(|(doc, _)| doc))
    }
}

/// Cluster whose centroid wins under `rule`; ties go to the lowest id
fn select_centroid<M: SimilarityMetric + ?Sized>(
    metric: &M,
    rule: SelectionRule,
    vector: &FeatureVector,
    centroids: &[FeatureVector],
) -> ClusterId {
    centroids
        .iter()
        .enumerate()
        .map(|(c, centroid)| (c, metric.similarity(centroid, vector)))
        .fold(None, |best: Option<(usize, f64)>, (c, score)| match best {
            Some((_, b)) if !rule.prefers(score, b) => best,
            _ => Some((c, score)),
        })
        .map(|(c, _)| c as ClusterId)
        .unwrap_or(0)
}

impl<M: SimilarityMetric, B: FeatureVectorBuilder> ClusteringAlgorithm for KMeans<M, B> {
    fn cluster(&mut self) -> Result<ClusterReport, ClusterError> {
        let vectors = match self.vectors.take() {
            Some(v) => v,
            None => match self.builder.build_feature_vectors(&self.result_set) {
                Ok(v) => v,
                Err(e) => {
                    self.results.writer().reset();
                    return Err(e);
                }
            },
        };

        let outcome = self.run(&vectors);
        self.vectors = Some(vectors);

        if outcome.is_err() {
            self.results.writer().reset();
            self.centroids.clear();
        }
        outcome
    }

    fn results(&self) -> &ClusterAssignment {
        &self.results
    }
}
