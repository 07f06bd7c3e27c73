use crate::error::AppError;
use crate::models::document::{Document, DocumentId};

use super::client::DocumentSource;

/// Fetch `id` from `source`.
///
/// A missing document and a failed read both surface as
/// `AppError::NotFound("File not found: {id}")`; the underlying cause is
/// logged.
pub async fn load_document(
    source: &dyn DocumentSource,
    id: &DocumentId,
) -> Result<Document, AppError> {
    match source.fetch(id).await {
        Ok(Some(content)) => {
            tracing::debug!(document = %id, bytes = content.len(), "document loaded");
            Ok(Document::new(id.clone(), content))
        }
        Ok(None) => {
            tracing::warn!(document = %id, "document not found");
            Err(not_found(id))
        }
        Err(e) => {
            tracing::error!(document = %id, error = %e, "failed to read document");
            Err(not_found(id))
        }
    }
}

/// Raw content of `id`, as consumed by the views' `from_load` constructors.
pub async fn load_content(
    source: &dyn DocumentSource,
    id: &DocumentId,
) -> Result<String, AppError> {
    load_document(source, id).await.map(|doc| doc.content)
}

fn not_found(id: &DocumentId) -> AppError {
    AppError::NotFound(format!("File not found: {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::client::MockDocumentSource;
    use mockall::predicate::eq;

    fn id(raw: &str) -> DocumentId {
        DocumentId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_load_existing_document() {
        let mut source = MockDocumentSource::new();
        source
            .expect_fetch()
            .with(eq(id("guide.md")))
            .times(1)
            .returning(|_| Ok(Some("# Guide".to_string())));

        let doc = load_document(&source, &id("guide.md")).await.unwrap();
        assert_eq!(doc.id.as_str(), "guide.md");
        assert_eq!(doc.content, "# Guide");
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let mut source = MockDocumentSource::new();
        source.expect_fetch().returning(|_| Ok(None));

        match load_document(&source, &id("missing.md")).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "File not found: missing.md"),
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_read_failure_is_reported_as_not_found() {
        let mut source = MockDocumentSource::new();
        source
            .expect_fetch()
            .returning(|_| Err(AppError::Storage("permission denied".into())));

        let err = load_content(&source, &id("locked.md")).await.unwrap_err();
        assert_eq!(err.to_string(), "File not found: locked.md");
    }
}
