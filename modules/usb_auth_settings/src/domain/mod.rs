//! Domain layer - resolution logic and its collaborator seams

pub mod device;
pub mod document;
pub mod hostname;
pub mod lookup;
pub mod path;
pub mod scope;
pub mod service;

pub use device::DeviceBinder;
pub use document::{Document, DocumentLoader};
pub use hostname::{FixedHostname, HostnameError, HostnameSource, SystemHostname};
pub use lookup::{LookupError, TypedLookup};
pub use path::{PathBuilder, PathError, Scope};
pub use scope::{ScopeOverlay, ScopeRead, ScopeResolver};
pub use service::Service;
