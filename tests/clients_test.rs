//! Client lifecycle: generated ids, search, KPI buckets, custom statuses.

use chrono::{Duration, Utc};

use claimdeck::AppError;
use claimdeck::clients::dashboard::DashboardStore;
use claimdeck::clients::statuses::{NewCustomStatus, StatusStore};
use claimdeck::clients::{ClientStore, NewClient, UpdateClient};
use claimdeck::testing::{TestDb, seed_org, seed_org_named};

fn new_client(first: &str, last: &str, city: &str) -> NewClient {
    serde_json::from_value(serde_json::json!({
        "first_name": first,
        "last_name": last,
        "city": city,
    }))
    .expect("client fixture deserializes")
}

#[tokio::test]
async fn client_ids_follow_city_date_initials_format() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = ClientStore::new(db.clone());

    let client = store
        .create(org.id, new_client("John", "Doe", "Chicago"))
        .await
        .unwrap();

    let today = Utc::now().date_naive().format("%Y%m%d").to_string();
    assert_eq!(client.id, format!("CH{}JD", today));
    assert_eq!(client.claim_status, "NOT_SUBMITTED");
    assert_eq!(client.first_check_status, "PENDING");
    assert!(!client.supplemented);
}

#[tokio::test]
async fn same_day_same_initials_get_suffixed_ids() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = ClientStore::new(db.clone());

    let first = store
        .create(org.id, new_client("John", "Doe", "Chicago"))
        .await
        .unwrap();
    let second = store
        .create(org.id, new_client("Jane", "Dawson", "Chicago"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.id, format!("{}-2", first.id));
}

#[tokio::test]
async fn search_matches_first_last_and_full_name() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = ClientStore::new(db.clone());

    store
        .create(org.id, new_client("John", "Doe", "Chicago"))
        .await
        .unwrap();
    store
        .create(org.id, new_client("Mary", "Johnson", "Dallas"))
        .await
        .unwrap();

    // Single word hits both first and last names.
    let hits = store.search(org.id, "john").await.unwrap();
    assert_eq!(hits.len(), 2);

    // Full-name search narrows to one.
    let hits = store.search(org.id, "john doe").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].first_name, "John");

    let hits = store.search(org.id, "nobody").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn clients_are_tenant_scoped() {
    let db = TestDb::new().await.unwrap().connection;
    let (org_a, _) = seed_org_named(&db, "Org A").await.unwrap();
    let (org_b, _) = seed_org_named(&db, "Org B").await.unwrap();
    let store = ClientStore::new(db.clone());

    let client = store
        .create(org_a.id, new_client("John", "Doe", "Chicago"))
        .await
        .unwrap();

    let err = store.get(org_b.id, &client.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(store.list(org_b.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_buckets_select_the_documented_rows() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = ClientStore::new(db.clone());

    // Late contact: last touched two weeks ago.
    let late = store
        .create(org.id, new_client("Larry", "Late", "Chicago"))
        .await
        .unwrap();
    store
        .update(
            org.id,
            &late.id,
            UpdateClient {
                last_contact_date: Some(Utc::now() - Duration::days(14)),
                supplemented: Some(true),
                claim_status: Some("SUBMITTED".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Ready for construction, with an upcoming contact in three days.
    let ready = store
        .create(org.id, new_client("Rita", "Ready", "Dallas"))
        .await
        .unwrap();
    store
        .update(
            org.id,
            &ready.id,
            UpdateClient {
                claim_status: Some("READY_FOR_CONSTRUCTION".to_string()),
                supplemented: Some(true),
                next_contact_date: Some(Utc::now() + Duration::days(3)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Untouched client: pending submission, not supplemented.
    store
        .create(org.id, new_client("Nina", "New", "Miami"))
        .await
        .unwrap();

    let dashboard = DashboardStore::new(db.clone());

    assert_eq!(dashboard.total_clients(org.id).await.unwrap().count, 3);

    let late_bucket = dashboard.late_contact(org.id, 7).await.unwrap();
    assert_eq!(late_bucket.count, 1);
    assert_eq!(late_bucket.clients[0].first_name, "Larry");

    let not_supplemented = dashboard.not_supplemented(org.id).await.unwrap();
    assert_eq!(not_supplemented.count, 1);
    assert_eq!(not_supplemented.clients[0].first_name, "Nina");

    let pending = dashboard.pending_submission(org.id).await.unwrap();
    assert_eq!(pending.count, 1);
    assert_eq!(pending.clients[0].first_name, "Nina");

    let ready_bucket = dashboard.ready_for_construction(org.id).await.unwrap();
    assert_eq!(ready_bucket.count, 1);
    assert_eq!(ready_bucket.clients[0].first_name, "Rita");

    let upcoming = dashboard.upcoming_contacts(org.id, 7).await.unwrap();
    assert_eq!(upcoming.count, 1);
    assert_eq!(upcoming.clients[0].first_name, "Rita");

    let by_status = dashboard.by_claim_status(org.id).await.unwrap();
    let statuses: Vec<_> = by_status.iter().map(|s| s.status.as_str()).collect();
    assert!(statuses.contains(&"NOT_SUBMITTED"));
    assert!(statuses.contains(&"SUBMITTED"));
    assert!(statuses.contains(&"READY_FOR_CONSTRUCTION"));
}

#[tokio::test]
async fn custom_claim_statuses_extend_the_builtin_set() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let statuses = StatusStore::new(db.clone());

    let created = statuses
        .create(
            org.id,
            NewCustomStatus {
                name: "IN_APPRAISAL".to_string(),
                display_name: "In appraisal".to_string(),
                color: Some("#f59e0b".to_string()),
                sort_order: 10,
            },
        )
        .await
        .unwrap();
    assert!(created.is_active);

    // Duplicates rejected.
    let err = statuses
        .create(
            org.id,
            NewCustomStatus {
                name: "IN_APPRAISAL".to_string(),
                display_name: "Duplicate".to_string(),
                color: None,
                sort_order: 0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Clients may carry the custom status.
    let store = ClientStore::new(db.clone());
    let client = store
        .create(org.id, new_client("Carl", "Custom", "Boston"))
        .await
        .unwrap();
    let updated = store
        .update(
            org.id,
            &client.id,
            UpdateClient {
                claim_status: Some("IN_APPRAISAL".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.claim_status, "IN_APPRAISAL");

    statuses.delete(org.id, created.id).await.unwrap();
    assert!(statuses.list(org.id).await.unwrap().is_empty());
}
