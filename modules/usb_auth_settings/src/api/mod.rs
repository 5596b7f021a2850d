//! API layer

pub mod cli;
pub mod native;
