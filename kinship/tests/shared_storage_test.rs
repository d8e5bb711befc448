//! Storage contract tests for SharedStorage over the in-memory engine

use chrono::Utc;
use kinship::models::{PersonBuilder, PersonRelation, User, UserRole};
use kinship::storage::{
    BaseStore, PersonStore, RelationStore, SharedStorage, SharedStorageConfig, StorageError,
    UserStore,
};

type TestStorage = SharedStorage<surrealdb::engine::local::Db>;

async fn create_test_storage() -> TestStorage {
    let config = SharedStorageConfig {
        namespace: "test".to_string(),
        database: "kinship_test".to_string(),
    };

    let client = surrealdb::Surreal::new::<surrealdb::engine::local::Mem>(())
        .await
        .expect("Failed to open memory engine");
    SharedStorage::new(client, config)
        .await
        .expect("Failed to create storage")
}

fn edge(from: &str, to: &str, relation_type: &str) -> PersonRelation {
    PersonRelation {
        id: String::new(),
        owner_id: "owner".to_string(),
        from_person_id: from.to_string(),
        to_person_id: to.to_string(),
        relation_type: relation_type.to_string(),
        notes: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_health_check() {
    let storage = create_test_storage().await;
    assert!(storage.health_check().await.unwrap());
}

#[tokio::test]
async fn test_unique_pair_index_rejects_reversed_edge() {
    let storage = create_test_storage().await;

    let created = storage.create_relation(edge("a", "b", "father")).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.relation_type, "father");

    let reversed = storage.create_relation(edge("b", "a", "child")).await;
    assert!(matches!(reversed, Err(StorageError::AlreadyExists(_))));

    assert_eq!(storage.list_relations_for_person("a").await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_for_one_pair() {
    let storage = std::sync::Arc::new(create_test_storage().await);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let storage = storage.clone();
            let edge = if i % 2 == 0 {
                edge("x", "y", "friend")
            } else {
                edge("y", "x", "friend")
            };
            tokio::spawn(async move { storage.create_relation(edge).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(StorageError::AlreadyExists(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(storage.list_relations_for_person("x").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_person_round_trip_and_ordering() {
    let storage = create_test_storage().await;

    for (first, last) in [("Zed", "Abbott"), ("Amy", "Baker"), ("Bea", "Abbott")] {
        storage
            .create_person(PersonBuilder::new("owner", first).last_name(last).build())
            .await
            .unwrap();
    }
    storage
        .create_person(PersonBuilder::new("someone-else", "Hidden").build())
        .await
        .unwrap();

    let listed = storage.list_persons_by_owner("owner").await.unwrap();
    let names: Vec<String> = listed.iter().map(|p| p.full_name()).collect();
    assert_eq!(names, vec!["Bea Abbott", "Zed Abbott", "Amy Baker"]);
    assert_eq!(storage.count_persons_by_owner("owner").await.unwrap(), 3);

    let fetched = storage.get_person(&listed[0].id).await.unwrap().unwrap();
    assert_eq!(fetched.owner_id, "owner");
    assert!(storage.get_person("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_relations_for_person_counts_both_directions() {
    let storage = create_test_storage().await;

    storage.create_relation(edge("p", "q", "mother")).await.unwrap();
    storage.create_relation(edge("r", "p", "friend")).await.unwrap();
    storage.create_relation(edge("q", "r", "cousin")).await.unwrap();

    assert_eq!(storage.delete_relations_for_person("p").await.unwrap(), 2);
    assert_eq!(storage.list_relations_by_owner("owner").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_external_id_is_unique() {
    let storage = create_test_storage().await;

    let user = User {
        id: String::new(),
        external_id: "sub-1".to_string(),
        username: "ada".to_string(),
        email: None,
        password_hash: None,
        role: UserRole::Researcher,
        created_at: Utc::now(),
    };

    let created = storage.create_user(user.clone()).await.unwrap();
    let found = storage.find_user_by_external_id("sub-1").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(
        storage.find_user_by_username("ada").await.unwrap().map(|u| u.id),
        Some(created.id)
    );

    let duplicate = storage.create_user(user).await;
    assert!(matches!(duplicate, Err(StorageError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_clear() {
    let storage = create_test_storage().await;
    storage.create_relation(edge("a", "b", "friend")).await.unwrap();

    storage.clear().await.unwrap();
    assert!(storage.list_relations_for_person("a").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_username_is_unique() {
    let storage = create_test_storage().await;

    let user = |external_id: &str| User {
        id: String::new(),
        external_id: external_id.to_string(),
        username: "grace".to_string(),
        email: None,
        password_hash: None,
        role: UserRole::Researcher,
        created_at: Utc::now(),
    };

    storage.create_user(user("sub-1")).await.unwrap();
    let duplicate = storage.create_user(user("sub-2")).await;
    assert!(matches!(duplicate, Err(StorageError::AlreadyExists(_))));
}
