//! Domain models for persons, relations and users

mod person;
mod relation;
mod user;

pub use person::{Person, PersonBuilder, PersonUpdate};
pub use relation::{
    CreateRelation, CreatedRelation, PairKey, PersonRef, PersonRelation, PersonSummary,
    RelationView, RelationshipTypesView,
};
pub use user::{User, UserRole};
