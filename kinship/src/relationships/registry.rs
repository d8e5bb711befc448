//! Relationship Type Registry
//!
//! Maps every relationship label to the label seen from the other person's
//! perspective. The table is built once per process and never mutated.
//!
//! The mapping is not an involution: `father` resolves to `child`, but `child`
//! is not itself a registered label.

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Error types for registry lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid relationship type: {0}")]
    InvalidRelationshipType(String),
}

/// Broad grouping of a relationship label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipCategory {
    Family,
    Marital,
    Professional,
    Social,
}

impl std::fmt::Display for RelationshipCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipCategory::Family => write!(f, "family"),
            RelationshipCategory::Marital => write!(f, "marital"),
            RelationshipCategory::Professional => write!(f, "professional"),
            RelationshipCategory::Social => write!(f, "social"),
        }
    }
}

use RelationshipCategory::{Family, Marital, Professional, Social};

/// (label, reciprocal, category) in presentation order
const RELATIONSHIP_TABLE: &[(&str, &str, RelationshipCategory)] = &[
    ("father", "child", Family),
    ("mother", "child", Family),
    ("parent", "child", Family),
    ("son", "parent", Family),
    ("daughter", "parent", Family),
    ("brother", "sibling", Family),
    ("sister", "sibling", Family),
    ("sibling", "sibling", Family),
    ("grandfather", "grandchild", Family),
    ("grandmother", "grandchild", Family),
    ("grandson", "grandparent", Family),
    ("granddaughter", "grandparent", Family),
    ("uncle", "nephew/niece", Family),
    ("aunt", "nephew/niece", Family),
    ("cousin", "cousin", Family),
    ("husband", "wife", Marital),
    ("wife", "husband", Marital),
    ("spouse", "spouse", Marital),
    ("partner", "partner", Marital),
    ("employer", "employee", Professional),
    ("employee", "employer", Professional),
    ("colleague", "colleague", Professional),
    ("mentor", "student", Professional),
    ("friend", "friend", Social),
    ("neighbor", "neighbor", Social),
    ("godparent", "godchild", Social),
];

lazy_static! {
    static ref GLOBAL_REGISTRY: RelationshipTypeRegistry = RelationshipTypeRegistry::from_table(RELATIONSHIP_TABLE);
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    reciprocal: &'static str,
    category: RelationshipCategory,
}

/// Immutable lookup table of relationship labels
#[derive(Debug)]
pub struct RelationshipTypeRegistry {
    order: Vec<&'static str>,
    entries: HashMap<&'static str, Entry>,
}

impl RelationshipTypeRegistry {
    /// The process-wide registry
    pub fn global() -> &'static RelationshipTypeRegistry {
        &GLOBAL_REGISTRY
    }

    fn from_table(table: &[(&'static str, &'static str, RelationshipCategory)]) -> Self {
        let mut order = Vec::with_capacity(table.len());
        let mut entries = HashMap::with_capacity(table.len());

        for &(label, reciprocal, category) in table {
            if entries
                .insert(label, Entry { reciprocal, category })
                .is_none()
            {
                order.push(label);
            }
        }

        Self { order, entries }
    }

    /// Return the reciprocal of `label`
    pub fn reciprocal(&self, label: &str) -> Result<&'static str, RegistryError> {
        self.entries
            .get(label)
            .map(|entry| entry.reciprocal)
            .ok_or_else(|| RegistryError::InvalidRelationshipType(label.to_string()))
    }

    /// Check whether `label` is a registered relationship type
    pub fn is_valid(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// All registered labels, in declaration order
    pub fn labels(&self) -> Vec<&'static str> {
        self.order.clone()
    }

    /// Label to reciprocal mapping
    pub fn reciprocals(&self) -> BTreeMap<&'static str, &'static str> {
        self.entries
            .iter()
            .map(|(label, entry)| (*label, entry.reciprocal))
            .collect()
    }

    /// Category of a registered label
    pub fn category(&self, label: &str) -> Option<RelationshipCategory> {
        self.entries.get(label).map(|entry| entry.category)
    }

    /// Number of registered labels
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_reciprocal_resolves() {
        let registry = RelationshipTypeRegistry::global();

        for (label, reciprocal, _) in RELATIONSHIP_TABLE {
            assert_eq!(registry.reciprocal(label).unwrap(), *reciprocal, "{label}");
        }
    }

    #[test]
    fn test_labels_preserve_declaration_order() {
        let registry = RelationshipTypeRegistry::global();
        let expected: Vec<&str> = RELATIONSHIP_TABLE.iter().map(|(l, _, _)| *l).collect();

        assert_eq!(registry.labels(), expected);
        assert_eq!(registry.len(), RELATIONSHIP_TABLE.len());
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_not_an_involution() {
        let registry = RelationshipTypeRegistry::global();

        assert_eq!(registry.reciprocal("father").unwrap(), "child");
        assert!(!registry.is_valid("child"));
        assert_eq!(
            registry.reciprocal("child"),
            Err(RegistryError::InvalidRelationshipType("child".to_string()))
        );
    }

    #[test]
    fn test_self_reciprocal_entries() {
        let registry = RelationshipTypeRegistry::global();

        for label in ["friend", "colleague", "spouse", "cousin", "sibling"] {
            assert_eq!(registry.reciprocal(label).unwrap(), label);
        }
    }

    #[test]
    fn test_unknown_label() {
        let registry = RelationshipTypeRegistry::global();

        assert!(!registry.is_valid("alien"));
        assert!(registry.reciprocal("alien").is_err());
        assert!(registry.category("alien").is_none());
        // lookups are case-sensitive
        assert!(!registry.is_valid("Father"));
    }

    #[test]
    fn test_categories() {
        let registry = RelationshipTypeRegistry::global();

        assert_eq!(registry.category("mother"), Some(RelationshipCategory::Family));
        assert_eq!(registry.category("wife"), Some(RelationshipCategory::Marital));
        assert_eq!(registry.category("mentor"), Some(RelationshipCategory::Professional));
        assert_eq!(registry.category("neighbor"), Some(RelationshipCategory::Social));
    }

    #[test]
    fn test_reciprocals_map_covers_all_labels() {
        let registry = RelationshipTypeRegistry::global();
        let map = registry.reciprocals();

        assert_eq!(map.len(), registry.len());
        for label in registry.labels() {
            assert!(map.contains_key(label));
        }
    }
}
