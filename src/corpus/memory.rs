use super::{DocId, ResultSet, TermStatistics, tokenize};
use std::collections::{BTreeMap, HashMap};

/// Small in-memory term index
///
/// Stands in for a real search index: it keeps per-document term frequencies,
/// per-term document frequencies, and can answer a bag-of-words query with a
/// ranked result set. Document ids start at 1.
#[derive(Debug, Default)]
pub struct InMemoryCorpus {
    /// doc -> term -> within-document frequency
    documents: BTreeMap<DocId, BTreeMap<String, u32>>,
    /// term -> number of documents containing it
    doc_freqs: HashMap<String, u64>,
    last_id: DocId,
}

impl InMemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize and index a piece of text as a new document
    pub fn add_document(&mut self, text: &str) -> DocId {
        self.add_terms(tokenize(text))
    }

    /// Index an already tokenized document
    pub fn add_terms<I, T>(&mut self, terms: I) -> DocId
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut termlist: BTreeMap<String, u32> = BTreeMap::new();
        for term in terms {
            *termlist.entry(term.into()).or_insert(0) += 1;
        }

        for term in termlist.keys() {
            *self.doc_freqs.entry(term.clone()).or_insert(0) += 1;
        }

        self.last_id += 1;
        self.documents.insert(self.last_id, termlist);
        self.last_id
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Every indexed document, in docid order
    pub fn all_documents(&self) -> ResultSet {
        ResultSet::from_unique(self.documents.keys().copied().collect())
    }

    /// Rank documents matching any query term
    ///
    /// Score is the summed tf-idf of the matched terms; ties go to the lower
    /// docid. At most `limit` documents are returned.
    pub fn search(&self, query: &str, limit: usize) -> ResultSet {
        let terms = tokenize(query);
        let n = self.documents.len() as f64;

        let mut scored: Vec<(DocId, f64)> = self
            .documents
            .iter()
            .filter_map(|(&doc, termlist)| {
                let mut matched = false;
                let mut score = 0.0;
                for term in &terms {
                    if let Some(&wdf) = termlist.get(term) {
                        matched = true;
                        let df = self.document_frequency(term).max(1) as f64;
                        score += wdf as f64 * (n / df).ln();
                    }
                }
                matched.then_some((doc, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(limit);

        ResultSet::from_unique(scored.into_iter().map(|(doc, _)| doc).collect())
    }
}

impl TermStatistics for InMemoryCorpus {
    fn document_count(&self) -> u64 {
        self.documents.len() as u64
    }

    fn document_frequency(&self, term: &str) -> u64 {
        self.doc_freqs.get(term).copied().unwrap_or(0)
    }

    fn termlist(&self, doc: DocId) -> Option<Vec<(String, u32)>> {
        self.documents
            .get(&doc)
            .map(|terms| terms.iter().map(|(t, &f)| (t.clone(), f)).collect())
    }
}
