//! Data transfer objects for the HTTP API
//!
//! Every body uses camelCase keys.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kinship::core::DashboardStats;
use kinship::models::{
    CreateRelation, CreatedRelation, Person, PersonBuilder, PersonRef, PersonSummary,
    PersonUpdate, RelationView, RelationshipTypesView,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ServerError, bad_request};

/// Query for listing a person's relations
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PersonRelationsQuery {
    /// Person whose relations are listed
    pub person_id: Option<String>,
}

/// Relation as seen from the queried person
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationDto {
    pub id: String,
    /// The other party
    pub person_id: String,
    pub person_name: String,
    pub relation_type: String,
    pub is_outgoing: bool,
    pub notes: Option<String>,
    pub other_person: PersonSummaryDto,
}

impl From<RelationView> for RelationDto {
    fn from(view: RelationView) -> Self {
        Self {
            id: view.id,
            person_id: view.person_id,
            person_name: view.person_name,
            relation_type: view.relation_type,
            is_outgoing: view.is_outgoing,
            notes: view.notes,
            other_person: view.other_person.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummaryDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_place: Option<String>,
}

impl From<PersonSummary> for PersonSummaryDto {
    fn from(summary: PersonSummary) -> Self {
        Self {
            id: summary.id,
            first_name: summary.first_name,
            last_name: summary.last_name,
            birth_date: summary.birth_date,
            death_date: summary.death_date,
            birth_place: summary.birth_place,
            death_place: summary.death_place,
        }
    }
}

/// Request to create a relation. Missing fields are reported by name.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationRequest {
    pub from_person_id: Option<String>,
    pub to_person_id: Option<String>,
    /// A label from the relationship type registry
    pub relation_type: Option<String>,
    pub notes: Option<String>,
}

impl From<CreateRelationRequest> for CreateRelation {
    fn from(request: CreateRelationRequest) -> Self {
        Self {
            from_person_id: request.from_person_id,
            to_person_id: request.to_person_id,
            relation_type: request.relation_type,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PersonRefDto {
    pub id: String,
    pub name: String,
}

impl From<PersonRef> for PersonRefDto {
    fn from(person: PersonRef) -> Self {
        Self {
            id: person.id,
            name: person.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRelationDto {
    pub id: String,
    pub from_person: PersonRefDto,
    pub to_person: PersonRefDto,
    pub relation_type: String,
    pub reciprocal_type: String,
    pub notes: Option<String>,
}

impl From<CreatedRelation> for CreatedRelationDto {
    fn from(created: CreatedRelation) -> Self {
        Self {
            id: created.id,
            from_person: created.from_person.into(),
            to_person: created.to_person.into(),
            relation_type: created.relation_type,
            reciprocal_type: created.reciprocal_type,
            notes: created.notes,
        }
    }
}

/// Registry contents for form population
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTypesDto {
    pub relationship_types: Vec<String>,
    /// Label to the label seen from the other person
    pub reciprocals: BTreeMap<String, String>,
}

impl From<RelationshipTypesView> for RelationshipTypesDto {
    fn from(view: RelationshipTypesView) -> Self {
        Self {
            relationship_types: view.relationship_types,
            reciprocals: view.reciprocals,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_place: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Person> for PersonDto {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            first_name: person.first_name,
            last_name: person.last_name,
            birth_date: person.birth_date,
            death_date: person.death_date,
            birth_place: person.birth_place,
            death_place: person.death_place,
            notes: person.notes,
            created_at: person.created_at,
            updated_at: person.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Free-form; partial dates such as "c. 1820" are kept verbatim
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_place: Option<String>,
    pub notes: Option<String>,
}

impl CreatePersonRequest {
    /// Build the person record for `owner_id`
    pub fn into_person(self, owner_id: &str) -> Result<Person, ServerError> {
        let first_name = self
            .first_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| bad_request("firstName is required"))?;

        Ok(PersonBuilder::new(owner_id, first_name)
            .last_name(self.last_name.unwrap_or_default())
            .birth(self.birth_date, self.birth_place)
            .death(self.death_date, self.death_place)
            .notes(self.notes)
            .build())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_place: Option<String>,
    pub notes: Option<String>,
}

impl From<UpdatePersonRequest> for PersonUpdate {
    fn from(request: UpdatePersonRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            birth_date: request.birth_date,
            death_date: request.death_date,
            birth_place: request.birth_place,
            death_place: request.death_place,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub person_count: usize,
    pub relation_count: usize,
    pub relations_by_type: BTreeMap<String, usize>,
    /// Keyed by family, marital, professional or social
    pub relations_by_category: BTreeMap<String, usize>,
}

impl From<DashboardStats> for DashboardStatsDto {
    fn from(stats: DashboardStats) -> Self {
        Self {
            person_count: stats.person_count,
            relation_count: stats.relation_count,
            relations_by_type: stats.relations_by_type,
            relations_by_category: stats.relations_by_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_relation_request_reads_camel_case() {
        let request: CreateRelationRequest = serde_json::from_str(
            r#"{"fromPersonId":"a","toPersonId":"b","relationType":"father"}"#,
        )
        .unwrap();

        assert_eq!(request.from_person_id.as_deref(), Some("a"));
        assert_eq!(request.to_person_id.as_deref(), Some("b"));
        assert_eq!(request.relation_type.as_deref(), Some("father"));
        assert!(request.notes.is_none());
    }

    #[test]
    fn test_relation_dto_writes_camel_case() {
        let dto = RelationDto {
            id: "r1".into(),
            person_id: "p2".into(),
            person_name: "George Byron".into(),
            relation_type: "child".into(),
            is_outgoing: false,
            notes: None,
            other_person: PersonSummaryDto {
                id: "p2".into(),
                first_name: "George".into(),
                last_name: "Byron".into(),
                birth_date: None,
                death_date: None,
                birth_place: None,
                death_place: None,
            },
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["personName"], "George Byron");
        assert_eq!(json["isOutgoing"], false);
        assert_eq!(json["otherPerson"]["firstName"], "George");
    }

    #[test]
    fn test_create_person_requires_first_name() {
        let request = CreatePersonRequest {
            last_name: Some("Byron".into()),
            ..Default::default()
        };
        assert!(matches!(
            request.into_person("owner"),
            Err(ServerError::BadRequest(_))
        ));
    }
}
