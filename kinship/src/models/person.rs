use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person record, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub owner_id: String,
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

impl Person {
    /// First and last name separated by a space, skipping empty parts
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", last) => last.to_string(),
            (first, "") => first.to_string(),
            (first, last) => format!("{} {}", first, last),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: PersonUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if update.birth_date.is_some() {
            self.birth_date = update.birth_date;
        }
        if update.death_date.is_some() {
            self.death_date = update.death_date;
        }
        if update.birth_place.is_some() {
            self.birth_place = update.birth_place;
        }
        if update.death_place.is_some() {
            self.death_place = update.death_place;
        }
        if update.notes.is_some() {
            self.notes = update.notes;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields that may change on an existing person
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_place: Option<String>,
    pub notes: Option<String>,
}

/// Builder for new [`Person`] records
#[derive(Debug, Clone)]
pub struct PersonBuilder {
    person: Person,
}

impl PersonBuilder {
    pub fn new(owner_id: impl Into<String>, first_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            person: Person {
                id: String::new(),
                owner_id: owner_id.into(),
                first_name: first_name.into(),
                last_name: String::new(),
                birth_date: None,
                death_date: None,
                birth_place: None,
                death_place: None,
                notes: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.person.last_name = last_name.into();
        self
    }

    pub fn birth(mut self, date: Option<String>, place: Option<String>) -> Self {
        self.person.birth_date = date;
        self.person.birth_place = place;
        self
    }

    pub fn death(mut self, date: Option<String>, place: Option<String>) -> Self {
        self.person.death_date = date;
        self.person.death_place = place;
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.person.notes = notes;
        self
    }

    pub fn build(self) -> Person {
        self.person
    }
}
