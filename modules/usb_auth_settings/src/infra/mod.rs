//! Infrastructure layer - document parsing and querying

pub mod xml;
