use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Person;

/// A directed relationship edge between two persons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRelation {
    pub id: String,
    /// User who recorded the edge; always the owner of both endpoints
    pub owner_id: String,
    pub from_person_id: String,
    pub to_person_id: String,
    pub relation_type: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PersonRelation {
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(&self.from_person_id, &self.to_person_id)
    }

    /// The endpoint opposite `person_id`, or `None` if it is not an endpoint
    pub fn other_endpoint(&self, person_id: &str) -> Option<&str> {
        if self.from_person_id == person_id {
            Some(&self.to_person_id)
        } else if self.to_person_id == person_id {
            Some(&self.from_person_id)
        } else {
            None
        }
    }
}

/// Canonical key for an unordered pair of persons.
///
/// `PairKey::new(a, b) == PairKey::new(b, a)`; storage holds a unique index on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey(String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{}:{}", low, high))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input for creating a relation. Required fields are optional here so that
/// missing values surface as validation errors rather than decode failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRelation {
    pub from_person_id: Option<String>,
    pub to_person_id: Option<String>,
    pub relation_type: Option<String>,
    pub notes: Option<String>,
}

/// Subset of a person shown alongside a relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_place: Option<String>,
}

impl From<&Person> for PersonSummary {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            birth_date: person.birth_date.clone(),
            death_date: person.death_date.clone(),
            birth_place: person.birth_place.clone(),
            death_place: person.death_place.clone(),
        }
    }
}

/// A relation seen from one of its endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationView {
    pub id: String,
    /// The other party
    pub person_id: String,
    pub person_name: String,
    /// Stored label when outgoing, its reciprocal when incoming
    pub relation_type: String,
    pub is_outgoing: bool,
    pub notes: Option<String>,
    pub other_person: PersonSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: String,
    pub name: String,
}

impl From<&Person> for PersonRef {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            name: person.full_name(),
        }
    }
}

/// Result of a successful relation create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedRelation {
    pub id: String,
    pub from_person: PersonRef,
    pub to_person: PersonRef,
    pub relation_type: String,
    pub reciprocal_type: String,
    pub notes: Option<String>,
}

/// Registry contents for form population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipTypesView {
    pub relationship_types: Vec<String>,
    pub reciprocals: BTreeMap<String, String>,
}
