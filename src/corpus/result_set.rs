use super::DocId;
use crate::clusterer::ClusterError;
use std::collections::HashSet;

/// Ordered, duplicate-free list of documents produced by a retrieval stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    docs: Vec<DocId>,
}

impl ResultSet {
    /// Build a result set in rank order, rejecting repeated documents
    pub fn new(docs: impl IntoIterator<Item = DocId>) -> Result<Self, ClusterError> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();

        for doc in docs {
            if !seen.insert(doc) {
                return Err(ClusterError::DuplicateDocument(doc));
            }
            ordered.push(doc);
        }

        Ok(Self { docs: ordered })
    }

    /// Wrap documents already known to be distinct
    pub(crate) fn from_unique(docs: Vec<DocId>) -> Self {
        debug_assert_eq!(docs.iter().collect::<HashSet<_>>().len(), docs.len());
        Self { docs }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Document at the given rank (0-based)
    pub fn get(&self, rank: usize) -> Option<DocId> {
        self.docs.get(rank).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DocId> + '_ {
        self.docs.iter().copied()
    }

    pub fn as_slice(&self) -> &[DocId] {
        &self.docs
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter().copied()
    }
}
