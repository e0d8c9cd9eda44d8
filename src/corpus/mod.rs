mod error;
mod loader;
mod memory;
mod result_set;
mod tokenize;


pub use error::CorpusError;
pub use loader::{JsonDocument, LoadedCorpus, load_directory, load_json};
pub use memory::InMemoryCorpus;
pub use result_set::ResultSet;
pub use tokenize::tokenize;

/// Opaque document identifier handed out by the index
pub type DocId = u32;

/// Read access to the index's term statistics
///
/// This is the only view of the underlying index the clustering engine needs:
/// collection size, per-term document frequency and per-document term lists.
pub trait TermStatistics: Send + Sync {
    /// Total number of documents in the collection
    fn document_count(&self) -> u64;

    /// Number of documents containing `term`
    fn document_frequency(&self, term: &str) -> u64;

    /// Terms of `doc` with their within-document frequency, ascending by term
    ///
    /// Returns `None` for a document the index does not know.
    fn termlist(&self, doc: DocId) -> Option<Vec<(String, u32)>>;
}

impl<T: TermStatistics + ?Sized> TermStatistics for &T {
    fn document_count(&self) -> u64 {
        (**self).document_count()
    }

    fn document_frequency(&self, term: &str) -> u64 {
        (**self).document_frequency(term)
    }

    fn termlist(&self, doc: DocId) -> Option<Vec<(String, u32)>> {
        (**self).termlist(doc)
    }
}

impl<T: TermStatistics + ?Sized> TermStatistics for std::sync::Arc<T> {
    fn document_count(&self) -> u64 {
        (**self).document_count()
    }

    fn document_frequency(&self, term: &str) -> u64 {
        (**self).document_frequency(term)
    }

    fn termlist(&self, doc: DocId) -> Option<Vec<(String, u32)>> {
        (**self).termlist(doc)
    }
}
