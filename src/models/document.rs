use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;

/// Identifier used when no `file` parameter is supplied.
pub const DEFAULT_DOCUMENT: &str = "index.md";

/// A validated document identifier: a relative, forward-slash path
/// below the docs root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Parse a raw identifier (as found in the `file` query parameter).
    ///
    /// Backslashes are normalized to `/`, a leading `./` is dropped, and
    /// absolute paths or `..` components are rejected.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let normalized = raw.trim().replace('\\', "/");
        let normalized = normalized.trim_start_matches("./");

        if normalized.is_empty() {
            return Err(AppError::BadRequest("Document identifier cannot be empty".into()));
        }
        if normalized.starts_with('/') || normalized.contains(':') {
            return Err(AppError::BadRequest(format!(
                "Document identifier must be a relative path: {raw}"
            )));
        }

        let mut parts = Vec::new();
        for part in normalized.split('/') {
            match part {
                "" | "." => continue,
                ".." => {
                    return Err(AppError::BadRequest(format!(
                        "Document identifier cannot leave the docs root: {raw}"
                    )))
                }
                other => parts.push(other),
            }
        }

        Ok(Self(parts.join("/")))
    }

    /// Parse an optional identifier, falling back to [`DEFAULT_DOCUMENT`].
    pub fn or_default(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim).filter(|r| !r.is_empty()) {
            Some(raw) => Self::parse(raw),
            None => Ok(Self(DEFAULT_DOCUMENT.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory part of the identifier (`""` for documents at the root).
    pub fn parent(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self(DEFAULT_DOCUMENT.to_string())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

/// A loaded markdown document. Replaced wholesale on navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub content: String,
}

impl Document {
    pub fn new(id: DocumentId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_file() {
        let id = DocumentId::parse("guide.md").unwrap();
        assert_eq!(id.as_str(), "guide.md");
        assert_eq!(id.parent(), "");
    }

    #[test]
    fn test_parse_nested_file() {
        let id = DocumentId::parse("./docs//intro/setup.md").unwrap();
        assert_eq!(id.as_str(), "docs/intro/setup.md");
        assert_eq!(id.parent(), "docs/intro");
    }

    #[test]
    fn test_parse_backslashes() {
        let id = DocumentId::parse("docs\\intro.md").unwrap();
        assert_eq!(id.as_str(), "docs/intro.md");
    }

    #[test]
    fn test_parent_traversal_rejected() {
        match DocumentId::parse("../secret.md") {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("docs root")),
            other => panic!("Expected BadRequest error, got: {:?}", other),
        }
        assert!(DocumentId::parse("docs/../../x.md").is_err());
    }

    #[test]
    fn test_absolute_paths_rejected() {
        assert!(DocumentId::parse("/etc/passwd").is_err());
        assert!(DocumentId::parse("C:/docs/a.md").is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(DocumentId::parse("   ").is_err());
    }

    #[test]
    fn test_or_default() {
        assert_eq!(DocumentId::or_default(None).unwrap().as_str(), "index.md");
        assert_eq!(DocumentId::or_default(Some("")).unwrap().as_str(), "index.md");
        assert_eq!(DocumentId::or_default(Some("a.md")).unwrap().as_str(), "a.md");
    }

    #[test]
    fn test_serde_validates() {
        let ok: DocumentId = serde_json::from_str("\"notes/a.md\"").unwrap();
        assert_eq!(ok.as_str(), "notes/a.md");
        assert!(serde_json::from_str::<DocumentId>("\"../a.md\"").is_err());
    }
}
