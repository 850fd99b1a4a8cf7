//! Construction pipeline: scope generation seeding a saved material order.

use claimdeck::AppError;
use claimdeck::construction::{
    ConstructionStore, MaterialItem, NewProject, RoofMeasurements, generate_material_order,
};
use claimdeck::testing::{TestDb, seed_org};

fn roofing_project(name: &str) -> NewProject {
    serde_json::from_value(serde_json::json!({
        "project_name": name,
        "roof_type": "Architectural",
        "roof_color": "Weathered Wood",
        "roof_squares": 20,
    }))
    .expect("project fixture deserializes")
}

#[tokio::test]
async fn generated_seed_round_trips_through_the_saved_order() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = ConstructionStore::new(db.clone());

    let project = store
        .create(org.id, roofing_project("Doe residence roof"))
        .await
        .unwrap();
    assert_eq!(project.permit_status, "PENDING");
    assert_eq!(project.project_status, "PLANNING");

    // Generate from the project's stored roof fields, as the generate
    // endpoint does when no extraction payload is supplied.
    let roof = RoofMeasurements {
        material: project.roof_type.clone(),
        color: project.roof_color.clone(),
        squares: project.roof_squares.map(f64::from),
        ..Default::default()
    };
    let seed = generate_material_order(&roof);
    assert_eq!(seed.first().unwrap().name, "Shingles");
    assert_eq!(seed.last().unwrap().name, "Caulking");

    let saved = store
        .save_material_order(org.id, project.id, seed.clone())
        .await
        .unwrap();

    let loaded = store
        .find_material_order(org.id, project.id)
        .await
        .unwrap()
        .expect("order saved");
    assert_eq!(loaded.id, saved.id);

    let items: Vec<MaterialItem> = serde_json::from_value(loaded.items).unwrap();
    assert_eq!(items, seed);
}

#[tokio::test]
async fn saving_again_replaces_the_line_list() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = ConstructionStore::new(db.clone());

    let project = store
        .create(org.id, roofing_project("Replace lines"))
        .await
        .unwrap();

    let seed = generate_material_order(&RoofMeasurements {
        squares: Some(20.0),
        ..Default::default()
    });
    let first = store
        .save_material_order(org.id, project.id, seed)
        .await
        .unwrap();

    // User trims the order down to two edited lines.
    let edited = vec![
        MaterialItem::new("Shingles", 22.0, "squares").with_notes("ordered 2 extra"),
        MaterialItem::new("Caulking", 4.0, "tubes"),
    ];
    let second = store
        .save_material_order(org.id, project.id, edited.clone())
        .await
        .unwrap();

    // Same row, new lines.
    assert_eq!(first.id, second.id);
    let items: Vec<MaterialItem> = serde_json::from_value(second.items).unwrap();
    assert_eq!(items, edited);
}

#[tokio::test]
async fn material_orders_require_an_owned_project() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = ConstructionStore::new(db.clone());

    let err = store
        .save_material_order(org.id, 9999, vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn project_search_matches_name() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = ConstructionStore::new(db.clone());

    store
        .create(org.id, roofing_project("Doe residence roof"))
        .await
        .unwrap();
    store
        .create(org.id, roofing_project("Smith garage siding"))
        .await
        .unwrap();

    let hits = store.search(org.id, "residence").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].project_name, "Doe residence roof");
}
