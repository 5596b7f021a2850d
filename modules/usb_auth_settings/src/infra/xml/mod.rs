//! XML configuration documents

pub mod document;
pub mod query;
pub mod tree;

pub use document::{XmlDocument, XmlDocumentLoader, ROOT_ELEMENT};
