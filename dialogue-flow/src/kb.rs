use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::session::Intent;

/// Marker appended to a preview when the article has more lines than shown.
pub const PREVIEW_TRUNCATION_MARKER: &str = "[... see full article for more details ...]";

/// Read-only store of knowledge-base articles, keyed by file name.
///
/// Loaded once at startup; there is no write path for the lifetime of the
/// process.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: HashMap<String, String>,
}

impl DocumentStore {
    /// Loads every `*.md` file in `dir`. A missing directory yields an
    /// empty store, not an error; unreadable files are skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut docs = HashMap::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => {
                warn!(dir = %dir.display(), "knowledge base directory not found, starting with empty store");
                return Self { docs };
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    docs.insert(name.to_string(), content);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable knowledge base file");
                }
            }
        }

        info!(count = docs.len(), dir = %dir.display(), "knowledge base loaded");
        Self { docs }
    }

    /// In-memory store for tests and demos.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            docs: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, doc_id: &str) -> Option<&str> {
        self.docs.get(doc_id).map(|s| s.as_str())
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.docs.contains_key(doc_id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Maps a resolved intent to a knowledge article and produces bounded
/// previews of it.
#[derive(Clone)]
pub struct DocumentMatcher {
    store: Arc<DocumentStore>,
}

/// Fixed intent-to-article mapping. Billing and policy changes share one
/// article on purpose.
const fn article_for(intent: Intent) -> &'static str {
    match intent {
        Intent::FileClaim => "claim-filing.md",
        Intent::Billing => "billing-payment.md",
        Intent::Roadside => "roadside-assistance.md",
        Intent::PolicyChange => "billing-payment.md",
    }
}

impl DocumentMatcher {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Resolves an intent to an article id present in the store. `None`
    /// means "no article available" and callers proceed without a citation.
    pub fn resolve(&self, intent: Intent) -> Option<String> {
        let doc_id = article_for(intent);
        if self.store.contains(doc_id) {
            Some(doc_id.to_string())
        } else {
            warn!(intent = %intent, doc_id = %doc_id, "mapped article not in store, no citation");
            None
        }
    }

    /// First `max_lines` lines of the article verbatim, with a fixed marker
    /// appended when the article is longer. Unknown ids yield `None`.
    pub fn preview(&self, doc_id: &str, max_lines: usize) -> Option<String> {
        let content = self.store.get(doc_id)?;
        let lines: Vec<&str> = content.split('\n').collect();
        let mut snippet = lines
            .iter()
            .take(max_lines)
            .copied()
            .collect::<Vec<_>>()
            .join("\n");
        if lines.len() > max_lines {
            snippet.push_str("\n\n");
            snippet.push_str(PREVIEW_TRUNCATION_MARKER);
        }
        Some(snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher_with(entries: Vec<(&str, &str)>) -> DocumentMatcher {
        DocumentMatcher::new(Arc::new(DocumentStore::from_entries(entries)))
    }

    fn full_store() -> DocumentMatcher {
        matcher_with(vec![
            ("claim-filing.md", "# Filing a Claim\nStep one."),
            ("billing-payment.md", "# Billing\nPay online."),
            ("roadside-assistance.md", "# Roadside\nStay safe."),
        ])
    }

    #[test]
    fn resolve_maps_each_intent_to_its_article() {
        let matcher = full_store();
        assert_eq!(
            matcher.resolve(Intent::FileClaim).as_deref(),
            Some("claim-filing.md")
        );
        assert_eq!(
            matcher.resolve(Intent::Billing).as_deref(),
            Some("billing-payment.md")
        );
        assert_eq!(
            matcher.resolve(Intent::Roadside).as_deref(),
            Some("roadside-assistance.md")
        );
        // Policy changes intentionally share the billing article.
        assert_eq!(
            matcher.resolve(Intent::PolicyChange).as_deref(),
            Some("billing-payment.md")
        );
    }

    #[test]
    fn resolve_returns_none_when_article_missing_from_store() {
        let matcher = matcher_with(vec![("claim-filing.md", "text")]);
        assert!(matcher.resolve(Intent::Roadside).is_none());
    }

    #[test]
    fn preview_returns_short_documents_verbatim() {
        let matcher = matcher_with(vec![("claim-filing.md", "line one\nline two")]);
        assert_eq!(
            matcher.preview("claim-filing.md", 10).as_deref(),
            Some("line one\nline two")
        );
    }

    #[test]
    fn preview_truncates_long_documents_with_marker() {
        let content = (1..=20)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let matcher = matcher_with(vec![("claim-filing.md", content.as_str())]);

        let preview = matcher.preview("claim-filing.md", 3).unwrap();
        assert!(preview.starts_with("line 1\nline 2\nline 3"));
        assert!(preview.ends_with(PREVIEW_TRUNCATION_MARKER));
        assert!(!preview.contains("line 4\n"));
    }

    #[test]
    fn preview_of_unknown_document_is_none() {
        let matcher = full_store();
        assert!(matcher.preview("no-such-doc.md", 10).is_none());
    }

    #[test]
    fn missing_directory_yields_empty_store() {
        let store = DocumentStore::load_dir("/definitely/not/a/real/kb/dir");
        assert!(store.is_empty());
    }

    #[test]
    fn load_dir_reads_only_markdown_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("claim-filing.md"), "# Claims").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let store = DocumentStore::load_dir(dir.path());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("claim-filing.md"), Some("# Claims"));
    }
}
