use super::{CorpusError, DocId, InMemoryCorpus};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// One entry of a JSON corpus file
#[derive(Debug, Clone, Deserialize)]
pub struct JsonDocument {
    pub id: String,
    pub text: String,
}

/// A corpus together with the external name of every document
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    pub corpus: InMemoryCorpus,
    pub names: BTreeMap<DocId, String>,
}

impl LoadedCorpus {
    /// External name of a document, falling back to its docid
    pub fn name(&self, doc: DocId) -> String {
        self.names
            .get(&doc)
            .cloned()
            .unwrap_or_else(|| format!("#{}", doc))
    }

    fn add(&mut self, name: String, text: &str) -> DocId {
        let doc = self.corpus.add_document(text);
        self.names.insert(doc, name);
        doc
    }
}

fn should_ignore(path: &Path) -> bool {
    let ignore_dirs = [
        "target",
        "node_modules",
        ".git",
        ".svn",
        ".hg",
        "__pycache__",
    ];

    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| ignore_dirs.contains(&name))
    })
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }

    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(&e)))
}

/// Index every text file under `root` whose extension is in `extensions`
///
/// An empty extension list accepts every file. Files that are not valid UTF-8
/// are skipped with a warning. Documents are added in path order so docids are
/// stable across runs over the same tree.
pub fn load_directory(root: &Path, extensions: &[String]) -> Result<LoadedCorpus, CorpusError> {
    let mut loaded = LoadedCorpus::default();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !should_ignore(e.path().strip_prefix(root).unwrap_or(e.path())))
    {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || !has_extension(path, extensions) {
            continue;
        }

        let bytes = fs::read(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = match String::from_utf8(bytes) {
            Ok(t) => t,
            Err(_) => {
                warn!(path = %path.display(), "skipping non UTF-8 file");
                continue;
            }
        };

        let name = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        let doc = loaded.add(name, &text);
        debug!(doc, path = %path.display(), "indexed file");
    }

    info!(
        root = %root.display(),
        documents = loaded.corpus.len(),
        "loaded directory corpus"
    );
    Ok(loaded)
}

/// Index documents from a JSON array of `{"id": ..., "text": ...}` objects
pub fn load_json(reader: impl Read) -> Result<LoadedCorpus, CorpusError> {
    let documents: Vec<JsonDocument> = serde_json::from_reader(reader)?;
    let mut loaded = LoadedCorpus::default();

    for doc in documents {
        loaded.add(doc.id, &doc.text);
    }

    info!(documents = loaded.corpus.len(), "loaded JSON corpus");
    Ok(loaded)
}
