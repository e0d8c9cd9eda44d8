use super::{ClusterError, ClusterId};
use crate::corpus::DocId;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Read-only result of a clustering run
///
/// Keeps two indices that always agree: document -> cluster and
/// cluster -> documents (in result-set order). Only a clustering algorithm
/// can change it, through an [`AssignmentWriter`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterAssignment {
    #[serde(skip)]
    doc_to_cluster: HashMap<DocId, ClusterId>,
    #[serde(rename = "clusters")]
    cluster_to_docs: BTreeMap<ClusterId, Vec<DocId>>,
    cluster_count: u32,
}

impl ClusterAssignment {
    pub(crate) fn new(cluster_count: u32) -> Self {
        Self {
            cluster_count,
            ..Self::default()
        }
    }

    /// Cluster the document was assigned to
    pub fn get_cluster_by_doc(&self, doc: DocId) -> Result<ClusterId, ClusterError> {
        self.doc_to_cluster
            .get(&doc)
            .copied()
            .ok_or(ClusterError::UnknownDocument(doc))
    }

    /// Members of a cluster, in result-set order
    ///
    /// A cluster without members is reported the same way as an id that was
    /// never valid.
    pub fn get_docs_by_cluster(&self, cluster: ClusterId) -> Result<&[DocId], ClusterError> {
        self.cluster_to_docs
            .get(&cluster)
            .map(|docs| docs.as_slice())
            .ok_or(ClusterError::UnknownCluster(cluster))
    }

    /// Number of clusters the run was configured with
    pub fn cluster_count(&self) -> u32 {
        self.cluster_count
    }

    /// Number of documents with an assigned cluster
    pub fn document_count(&self) -> usize {
        self.doc_to_cluster.len()
    }

    /// Non-empty clusters in ascending id order
    pub fn clusters(&self) -> impl Iterator<Item = (ClusterId, &[DocId])> + '_ {
        self.cluster_to_docs
            .iter()
            .map(|(&c, docs)| (c, docs.as_slice()))
    }

    /// Members of `cluster`, empty when it has none
    pub(crate) fn members(&self, cluster: ClusterId) -> &[DocId] {
        self.cluster_to_docs
            .get(&cluster)
            .map(|docs| docs.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn writer(&mut self) -> AssignmentWriter<'_> {
        AssignmentWriter { assignment: self }
    }
}

/// Mutation handle over a [`ClusterAssignment`]
///
/// Only handed out inside the crate, to the algorithm that owns the
/// assignment.
pub struct AssignmentWriter<'a> {
    assignment: &'a mut ClusterAssignment,
}

impl AssignmentWriter<'_> {
    /// Forget every recorded cluster membership
    pub fn clear_cluster_to_docs(&mut self) {
        self.assignment.cluster_to_docs.clear();
    }

    /// Forget both indices
    pub fn reset(&mut self) {
        self.assignment.cluster_to_docs.clear();
        self.assignment.doc_to_cluster.clear();
    }

    pub fn set_cluster_for_doc(&mut self, doc: DocId, cluster: ClusterId) {
        self.assignment.doc_to_cluster.insert(doc, cluster);
    }

    pub fn add_doc_for_cluster(&mut self, cluster: ClusterId, doc: DocId) {
        self.assignment
            .cluster_to_docs
            .entry(cluster)
            .or_default()
            .push(doc);
    }

    /// Record `doc` under `cluster` in both indices
    pub fn assign(&mut self, doc: DocId, cluster: ClusterId) {
        self.set_cluster_for_doc(doc, cluster);
        self.add_doc_for_cluster(cluster, doc);
    }

    /// Move an already assigned document to another cluster
    ///
    /// The source cluster's entry is dropped once it has no members left, so
    /// both indices keep agreeing.
    pub fn move_doc(&mut self, doc: DocId, to: ClusterId) -> Result<(), ClusterError> {
        let from = self.assignment.get_cluster_by_doc(doc)?;
        if from == to {
            return Ok(());
        }

        if let Some(docs) = self.assignment.cluster_to_docs.get_mut(&from) {
            docs.retain(|&d| d != doc);
            if docs.is_empty() {
                self.assignment.cluster_to_docs.remove(&from);
            }
        }

        self.assign(doc, to);
        Ok(())
    }
}
