//! [`Document`] and [`DocumentLoader`] backed by an XML file

use super::query::PathExpr;
use super::tree::{self, Element};
use crate::contract::{DocumentError, QueryError};
use crate::domain::{Document, DocumentLoader};
use std::path::Path;

/// Name every configuration document's root element must carry
pub const ROOT_ELEMENT: &str = "configuration";

/// A parsed configuration document held in memory
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    /// Parse a document and check its root element
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        let root = tree::parse(content)?;
        if root.name != ROOT_ELEMENT {
            return Err(DocumentError::Schema(format!(
                "root element is <{}>, expected <{ROOT_ELEMENT}>",
                root.name
            )));
        }
        Ok(Self { root })
    }
}

impl Document for XmlDocument {
    fn query_text(&self, expression: &str) -> Result<Option<String>, QueryError> {
        let path = PathExpr::parse(expression)?;
        match path.select(&self.root).as_slice() {
            [] => Ok(None),
            [element] => Ok(Some(element.text.clone())),
            many => Err(QueryError::Ambiguous {
                expression: expression.to_owned(),
                matches: many.len(),
            }),
        }
    }
}

/// Reads configuration documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDocumentLoader;

impl XmlDocumentLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for XmlDocumentLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Document>, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        let document = XmlDocument::parse(&content)?;
        tracing::trace!(path = %path.display(), "Configuration document loaded");
        Ok(Box::new(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"<configuration>
        <defaults>
            <option name="debug"> true </option>
        </defaults>
        <users>
            <user name="alice"><device>d1</device></user>
            <user name="eve"><device>d1</device></user>
            <user name="eve"><device>d2</device></user>
        </users>
    </configuration>"#;

    #[test]
    fn test_query_single_match() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        assert_eq!(
            doc.query_text("/configuration/defaults/option[@name='debug']")
                .unwrap()
                .as_deref(),
            Some(" true ")
        );
        assert_eq!(
            doc.query_text("/configuration/users/user[@name='alice']/device")
                .unwrap()
                .as_deref(),
            Some("d1")
        );
    }

    #[test]
    fn test_query_no_match() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        assert_eq!(
            doc.query_text("/configuration/users/user[@name='bob']/device")
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_query_ambiguous() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        let err = doc
            .query_text("/configuration/users/user[@name='eve']/device")
            .unwrap_err();
        assert!(matches!(err, QueryError::Ambiguous { matches: 2, .. }));
    }

    #[test]
    fn test_query_malformed() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        assert!(matches!(
            doc.query_text("configuration/defaults"),
            Err(QueryError::Malformed { .. })
        ));
    }

    #[test]
    fn test_wrong_root_is_schema_error() {
        assert!(matches!(
            XmlDocument::parse("<settings/>"),
            Err(DocumentError::Schema(_))
        ));
    }

    #[test]
    fn test_loader_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let doc = XmlDocumentLoader::new().load(file.path()).unwrap();
        assert!(doc
            .query_text("/configuration/users/user[@name='alice']/device")
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_loader_missing_file() {
        let err = XmlDocumentLoader::new()
            .load(Path::new("/nonexistent/pamusb.conf"))
            .err()
            .unwrap();
        assert!(matches!(err, DocumentError::Io(_)));
    }

    #[test]
    fn test_loader_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<configuration><users>").unwrap();
        let err = XmlDocumentLoader::new().load(file.path()).err().unwrap();
        assert!(matches!(err, DocumentError::Syntax(_)));
    }
}
