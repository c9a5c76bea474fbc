//! Store-level behaviour: seeding, merge semantics and uniqueness.

use chrono::Utc;
use evently::config::{Config, SecurityConfig};
use evently::db::{Filter, SeedOutcome, Store, StoreError, seed_if_empty};
use evently::state::SharedState;
use evently::domain::{DocumentId, DomainError, Patch, Ref};
use evently::models::{Event, EventCategory, Theme, User, default_categories};
use evently::services::{
    AuthService, CategoryService, Registration, SeaOrmAuthService, SeaOrmCategoryService,
    SeaOrmSettingsService, SettingsService,
};
use std::sync::Arc;

async fn memory_store() -> Store {
    Store::new("sqlite::memory:")
        .await
        .expect("Failed to open in-memory store")
}

fn cheap_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 64,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

fn sample_event(name: &str) -> Event {
    let now = Utc::now();
    Event {
        name: name.to_string(),
        description: Some("yearly".to_string()),
        start_time: evently::domain::timestamp::parse("2025-01-01T10:00").unwrap(),
        end_time: evently::domain::timestamp::parse("2025-01-01T12:00").unwrap(),
        location: Some("Lima".to_string()),
        category_id: None,
        created_by: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn seeding_twice_yields_one_default_set() {
    let store = memory_store().await;
    let categories = SeaOrmCategoryService::new(&store);

    let first = categories.seed_defaults().await.unwrap();
    let second = categories.seed_defaults().await.unwrap();

    assert_eq!(first.inserted(), 6);
    assert_eq!(second.inserted(), 0);
    assert_eq!(categories.list().await.unwrap().len(), 6);
}

#[tokio::test]
async fn seeding_respects_its_scope() {
    let store = memory_store().await;
    let collection = store.categories();

    collection
        .insert(&EventCategory {
            name: "Cine".to_string(),
            description: None,
            icon: None,
            color: None,
        })
        .await
        .unwrap();

    let outcome = seed_if_empty(&collection, &Filter::new(), &default_categories())
        .await
        .unwrap();
    assert_eq!(outcome.inserted(), 0);

    let scoped = Filter::new().eq("icon", "music");
    let outcome = seed_if_empty(&collection, &scoped, &default_categories()[..1])
        .await
        .unwrap();
    assert_eq!(outcome.inserted(), 1);
}

#[tokio::test]
async fn update_replaces_only_named_fields() {
    let store = memory_store().await;
    let events = store.events();
    let id = events.insert(&sample_event("Launch")).await.unwrap();

    let patch = Patch::new()
        .with("name", "Launch v2")
        .unwrap()
        .with("location", Option::<String>::None)
        .unwrap();
    assert_eq!(events.update_by_id(id, &patch).await.unwrap(), 1);

    let stored = events.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.doc.name, "Launch v2");
    assert_eq!(stored.doc.location.as_deref(), Some("Lima"));
    assert_eq!(stored.doc.description.as_deref(), Some("yearly"));
    assert_eq!(stored.doc.start_time, sample_event("x").start_time);
}

#[tokio::test]
async fn update_and_delete_report_matched_counts() {
    let store = memory_store().await;
    let events = store.events();
    let missing = DocumentId::new();

    let patch = Patch::new().with("name", "Nope").unwrap();
    assert_eq!(events.update_by_id(missing, &patch).await.unwrap(), 0);
    assert_eq!(events.update_by_id(missing, &Patch::new()).await.unwrap(), 0);
    assert_eq!(events.delete_by_id(missing).await.unwrap(), 0);

    let id = events.insert(&sample_event("Launch")).await.unwrap();
    assert_eq!(events.update_by_id(id, &Patch::new()).await.unwrap(), 1);
    assert_eq!(events.delete_by_id(id).await.unwrap(), 1);
    assert!(events.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn collections_are_isolated() {
    let store = memory_store().await;
    let id = store.events().insert(&sample_event("Launch")).await.unwrap();

    assert!(store.categories().find_by_id(id).await.unwrap().is_none());
    assert_eq!(store.categories().delete_by_id(id).await.unwrap(), 0);
    assert_eq!(store.events().count(&Filter::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn weak_refs_resolve_to_none_when_dangling() {
    let store = memory_store().await;
    let events = store.events();
    let id = events.insert(&sample_event("Launch")).await.unwrap();

    let live: Ref<Event> = Ref::new(id);
    assert_eq!(events.resolve(&live).await.unwrap().unwrap().doc.name, "Launch");

    events.delete_by_id(id).await.unwrap();
    assert!(events.resolve(&live).await.unwrap().is_none());
}

fn user(username: &str, email: &str) -> User {
    User {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "x".to_string(),
        role: "usuario".to_string(),
    }
}

#[tokio::test]
async fn unique_index_backstops_raw_inserts() {
    let store = memory_store().await;
    let users = store.users();
    users.insert(&user("ana", "ana@example.com")).await.unwrap();

    let err = users
        .insert(&user("ana", "other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation(_)), "{err:?}");
    let domain: DomainError = err.into();
    assert!(
        matches!(&domain, DomainError::DuplicateValue(msg) if msg == "username already exists"),
        "{domain:?}"
    );

    let err = users
        .insert(&user("bea", "ana@example.com"))
        .await
        .unwrap_err();
    let domain: DomainError = err.into();
    assert!(
        matches!(&domain, DomainError::DuplicateValue(msg) if msg == "email already exists"),
        "{domain:?}"
    );

    assert_eq!(users.count(&Filter::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_registration_leaves_one_document() {
    let store = memory_store().await;
    let auth = SeaOrmAuthService::new(&store, cheap_security());
    let registration = Registration {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "pw".to_string(),
        role: "usuario".to_string(),
    };

    auth.register(registration.clone()).await.unwrap();
    let err = auth.register(registration).await.unwrap_err();
    // the guard and the unique index word the conflict the same way
    assert!(
        matches!(&err, DomainError::DuplicateValue(msg) if msg == "username already exists"),
        "{err:?}"
    );

    let count = store
        .users()
        .count(&Filter::new().eq("username", "ana"))
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn concurrent_settings_initialize_creates_one_document() {
    let db_path =
        std::env::temp_dir().join(format!("evently-store-test-{}.db", uuid::Uuid::new_v4()));
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .unwrap();

    let settings = Arc::new(SeaOrmSettingsService::new(
        &store,
        Config::default().settings_defaults,
    ));
    let user: Ref<User> = Ref::new(DocumentId::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let settings = settings.clone();
            tokio::spawn(async move { settings.initialize(user).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);

    let fetched = settings.get_or_initialize(user).await.unwrap();
    assert_eq!(fetched.doc.theme, Theme::Light);
    assert_eq!(
        store
            .user_settings()
            .count(&Filter::new().eq("user_id", user.to_string()))
            .await
            .unwrap(),
        1
    );

    store.close().await.unwrap();
    std::fs::remove_file(&db_path).ok();
}

#[tokio::test]
async fn filters_match_booleans_and_strings() {
    let store = memory_store().await;
    let images = store.images();
    let event: Ref<Event> = Ref::new(DocumentId::new());

    for (url, is_header) in [("a", false), ("b", true), ("c", true)] {
        images
            .insert(&evently::models::EventImage {
                event_id: event,
                url: url.to_string(),
                upload_date: Utc::now(),
                is_header,
                alt_text: None,
            })
            .await
            .unwrap();
    }

    let headers = Filter::new()
        .eq("event_id", event.to_string())
        .eq("is_header", true);
    assert_eq!(images.count(&headers).await.unwrap(), 2);
    assert_eq!(images.find_one(&headers).await.unwrap().unwrap().doc.url, "b");

    let others = Filter::new().eq("event_id", DocumentId::new().to_string());
    assert!(images.find_all(&others).await.unwrap().is_empty());
}

#[tokio::test]
async fn startup_seeding_reports_store_failures() {
    let store = memory_store().await;
    let shared = SharedState::with_store(Config::default(), store.clone());

    let outcome = evently::seed_on_startup(&shared).await.unwrap();
    assert_eq!(outcome, SeedOutcome::Seeded(default_categories().len()));

    store.close().await.unwrap();
    assert!(evently::seed_on_startup(&shared).await.is_err());
}
