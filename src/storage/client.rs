use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::AppError;
use crate::models::document::DocumentId;

/// Where markdown documents come from.
///
/// Abstracted as a trait so views and handlers can be exercised without a
/// docs directory on disk.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Read the raw markdown of `id`. Returns `None` if the document doesn't
    /// exist.
    async fn fetch(&self, id: &DocumentId) -> Result<Option<String>, AppError>;
}

/// Reads documents from a directory tree.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    root: PathBuf,
}

impl FsDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of `id` below the docs root.
    pub fn path_for(&self, id: &DocumentId) -> PathBuf {
        id.as_str()
            .split('/')
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

#[async_trait]
impl DocumentSource for FsDocumentSource {
    async fn fetch(&self, id: &DocumentId) -> Result<Option<String>, AppError> {
        let path = self.path_for(id);

        #[cfg(feature = "ssr")]
        let read = tokio::fs::read_to_string(&path).await;
        #[cfg(not(feature = "ssr"))]
        let read = std::fs::read_to_string(&path);

        match read {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }
}

/// Keeps documents in memory. Used by the CLI for stdin input and by tests.
#[derive(Debug, Default)]
pub struct MemoryDocumentSource {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, id: &DocumentId, content: impl Into<String>) -> Self {
        self.insert(id, content);
        self
    }

    pub fn insert(&self, id: &DocumentId, content: impl Into<String>) {
        if let Ok(mut documents) = self.documents.write() {
            documents.insert(id.as_str().to_string(), content.into());
        }
    }
}

#[async_trait]
impl DocumentSource for MemoryDocumentSource {
    async fn fetch(&self, id: &DocumentId) -> Result<Option<String>, AppError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| AppError::Storage("Document store lock poisoned".into()))?;
        Ok(documents.get(id.as_str()).cloned())
    }
}
