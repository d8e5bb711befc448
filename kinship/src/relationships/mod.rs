//! Relationship types between persons.
//!
//! The set of valid relationship labels and their reciprocals is fixed at
//! compile time; see [`RelationshipTypeRegistry`].

pub mod registry;

pub use registry::{RegistryError, RelationshipCategory, RelationshipTypeRegistry};
