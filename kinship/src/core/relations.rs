//! Relation listing and creation

use std::collections::HashMap;

use super::KinshipManager;
use crate::models::{
    CreateRelation, CreatedRelation, Person, PersonRef, PersonRelation, PersonSummary,
    RelationView, RelationshipTypesView,
};
use crate::storage::StorageError;
use crate::{KinshipError, Result};

impl KinshipManager {
    /// Load a person and check it belongs to `user_id`.
    ///
    /// A person owned by someone else is reported exactly like a missing one.
    pub async fn assert_owned(&self, person_id: &str, user_id: &str) -> Result<Person> {
        match self.storage.get_person(person_id).await? {
            Some(person) if person.is_owned_by(user_id) => Ok(person),
            Some(_) => {
                tracing::warn!(person_id, user_id, "Ownership check failed");
                Err(person_not_found(person_id))
            }
            None => Err(person_not_found(person_id)),
        }
    }

    /// Relations of a person, labelled from that person's perspective.
    ///
    /// Edges are kept when at least one endpoint belongs to `user_id`. The
    /// stored label is used on outgoing edges and its reciprocal on incoming
    /// ones. Results are ordered by label, then by the other party's first name.
    pub async fn list_relations(&self, person_id: &str, user_id: &str) -> Result<Vec<RelationView>> {
        if person_id.trim().is_empty() {
            return Err(KinshipError::Validation("personId is required".to_string()));
        }

        let edges = self.storage.list_relations_for_person(person_id).await?;
        let persons = self.load_endpoints(&edges).await?;

        let mut views = Vec::with_capacity(edges.len());
        for edge in edges {
            let owned = [&edge.from_person_id, &edge.to_person_id]
                .into_iter()
                .filter_map(|id| persons.get(id.as_str()))
                .any(|person| person.is_owned_by(user_id));
            if !owned {
                continue;
            }

            let Some(other_id) = edge.other_endpoint(person_id) else {
                continue;
            };
            let Some(other) = persons.get(other_id) else {
                tracing::warn!(relation_id = %edge.id, other_id, "Relation points at a missing person");
                continue;
            };

            let is_outgoing = edge.from_person_id == person_id;
            let relation_type = if is_outgoing {
                edge.relation_type.clone()
            } else {
                self.reciprocal_or_stored(&edge)
            };

            views.push(RelationView {
                id: edge.id.clone(),
                person_id: other.id.clone(),
                person_name: other.full_name(),
                relation_type,
                is_outgoing,
                notes: edge.notes.clone(),
                other_person: PersonSummary::from(other),
            });
        }

        views.sort_by(|a, b| {
            a.relation_type
                .cmp(&b.relation_type)
                .then_with(|| a.other_person.first_name.cmp(&b.other_person.first_name))
        });

        Ok(views)
    }

    /// Record a directed relation between two persons owned by `user_id`.
    ///
    /// Checks run in order: required fields, relationship type, distinct
    /// endpoints, ownership of both persons. Only one edge may link a given
    /// unordered pair; the storage unique index enforces this.
    pub async fn create_relation(
        &self,
        user_id: &str,
        request: CreateRelation,
    ) -> Result<CreatedRelation> {
        let (from_id, to_id, relation_type) = match (
            non_empty(request.from_person_id),
            non_empty(request.to_person_id),
            non_empty(request.relation_type),
        ) {
            (Some(from), Some(to), Some(relation_type)) => (from, to, relation_type),
            (from, to, relation_type) => {
                let missing: Vec<&str> = [
                    ("fromPersonId", from.is_none()),
                    ("toPersonId", to.is_none()),
                    ("relationType", relation_type.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, is_missing)| is_missing.then_some(name))
                .collect();

                return Err(KinshipError::Validation(format!(
                    "Missing required fields: {}",
                    missing.join(", ")
                )));
            }
        };

        let reciprocal_type = self.registry.reciprocal(&relation_type)?;

        let from_person = self.assert_owned(&from_id, user_id).await?;
        let to_person = self.assert_owned(&to_id, user_id).await?;

        if from_id == to_id {
            return Err(KinshipError::Validation(
                "A person cannot be related to themselves".to_string(),
            ));
        }

        let relation = PersonRelation {
            id: String::new(),
            owner_id: user_id.to_string(),
            from_person_id: from_id,
            to_person_id: to_id,
            relation_type,
            notes: non_empty(request.notes),
            created_at: chrono::Utc::now(),
        };

        let created = self
            .storage
            .create_relation(relation)
            .await
            .map_err(|e| match e {
                StorageError::AlreadyExists(_) => KinshipError::Conflict(
                    "A relation between these persons already exists".to_string(),
                ),
                other => KinshipError::Storage(other),
            })?;

        tracing::info!(
            relation_id = %created.id,
            from = %created.from_person_id,
            to = %created.to_person_id,
            relation_type = %created.relation_type,
            "Relation created"
        );

        Ok(CreatedRelation {
            id: created.id,
            from_person: PersonRef::from(&from_person),
            to_person: PersonRef::from(&to_person),
            relation_type: created.relation_type,
            reciprocal_type: reciprocal_type.to_string(),
            notes: created.notes,
        })
    }

    /// All relationship labels and their reciprocals
    pub fn relationship_types(&self) -> RelationshipTypesView {
        RelationshipTypesView {
            relationship_types: self
                .registry
                .labels()
                .into_iter()
                .map(str::to_string)
                .collect(),
            reciprocals: self
                .registry
                .reciprocals()
                .into_iter()
                .map(|(label, reciprocal)| (label.to_string(), reciprocal.to_string()))
                .collect(),
        }
    }

    async fn load_endpoints(&self, edges: &[PersonRelation]) -> Result<HashMap<String, Person>> {
        let mut persons = HashMap::new();

        for edge in edges {
            for id in [&edge.from_person_id, &edge.to_person_id] {
                if persons.contains_key(id.as_str()) {
                    continue;
                }
                if let Some(person) = self.storage.get_person(id).await? {
                    persons.insert(id.clone(), person);
                }
            }
        }

        Ok(persons)
    }

    /// Labels recorded before a registry change may no longer resolve; show
    /// them as stored rather than failing the whole listing
    fn reciprocal_or_stored(&self, edge: &PersonRelation) -> String {
        match self.registry.reciprocal(&edge.relation_type) {
            Ok(reciprocal) => reciprocal.to_string(),
            Err(_) => {
                tracing::warn!(
                    relation_id = %edge.id,
                    relation_type = %edge.relation_type,
                    "Stored relation type has no reciprocal"
                );
                edge.relation_type.clone()
            }
        }
    }
}

fn person_not_found(person_id: &str) -> KinshipError {
    KinshipError::NotFound(format!("Person '{}' not found", person_id))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
