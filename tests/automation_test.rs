//! End-to-end automation behavior: activity logs firing rules into tasks.

use chrono::Duration;

use claimdeck::activity::{ActivityStore, ActivityType, NewActivityLog};
use claimdeck::clients::{ClientStore, NewClient};
use claimdeck::tasks::{TaskCategory, TaskPriority, TaskStore};
use claimdeck::testing::{TestDb, seed_member, seed_org};
use claimdeck::workflow::{NewRole, NewRule, UpdateRule, WorkflowStore};

fn new_client(first: &str, last: &str) -> NewClient {
    serde_json::from_value(serde_json::json!({
        "first_name": first,
        "last_name": last,
        "city": "Chicago",
    }))
    .expect("client fixture deserializes")
}

fn scope_received(client_id: &str) -> NewActivityLog {
    NewActivityLog {
        client_id: Some(client_id.to_string()),
        activity_type: ActivityType::ScopeReceived,
        subject: Some("Scope received from carrier".to_string()),
        description: None,
        outcome: None,
        contact_method: None,
        duration_minutes: None,
        performed_by: None,
        performed_at: None,
    }
}

#[tokio::test]
async fn rule_creates_assigned_task_on_matching_activity() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let estimator = seed_member(&db, org.id, "Estimator").await.unwrap();

    let workflow = WorkflowStore::new(db.clone());
    let role = workflow
        .create_role(
            org.id,
            NewRole {
                name: "Estimating".to_string(),
                description: None,
                primary_member_id: Some(estimator.id),
                secondary_member_ids: vec![],
            },
        )
        .await
        .unwrap();

    workflow
        .create_rule(
            org.id,
            NewRule {
                activity_type: ActivityType::ScopeReceived.as_str().to_string(),
                task_title: "Prepare estimate".to_string(),
                task_description: Some("Compare carrier scope against ours".to_string()),
                role_id: Some(role.id),
                category: TaskCategory::Estimate,
                priority: TaskPriority::High,
                due_in_days: Some(3),
            },
        )
        .await
        .unwrap();

    let client = ClientStore::new(db.clone())
        .create(org.id, new_client("John", "Doe"))
        .await
        .unwrap();

    let log = ActivityStore::new(db.clone())
        .create(org.id, scope_received(&client.id))
        .await
        .unwrap();
    let created = workflow.apply_to_log(&log).await.unwrap();

    assert_eq!(created.len(), 1);
    let task = &created[0];
    assert_eq!(task.title, "Prepare estimate");
    assert_eq!(task.assigned_to, Some(estimator.id));
    assert_eq!(task.client_id.as_deref(), Some(client.id.as_str()));
    assert_eq!(task.priority, "HIGH");

    let due = task.due_date.expect("due date set");
    let expected = log.performed_at + Duration::days(3);
    assert!((due - expected).num_seconds().abs() < 5);
}

#[tokio::test]
async fn non_matching_activity_creates_no_tasks() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();

    let workflow = WorkflowStore::new(db.clone());
    workflow
        .create_rule(
            org.id,
            NewRule {
                activity_type: ActivityType::ScopeReceived.as_str().to_string(),
                task_title: "Prepare estimate".to_string(),
                task_description: None,
                role_id: None,
                category: TaskCategory::Estimate,
                priority: TaskPriority::Medium,
                due_in_days: None,
            },
        )
        .await
        .unwrap();

    let log = ActivityStore::new(db.clone())
        .create(
            org.id,
            NewActivityLog {
                client_id: None,
                activity_type: ActivityType::Call,
                subject: None,
                description: None,
                outcome: None,
                contact_method: Some("phone".to_string()),
                duration_minutes: Some(10),
                performed_by: None,
                performed_at: None,
            },
        )
        .await
        .unwrap();

    let created = workflow.apply_to_log(&log).await.unwrap();
    assert!(created.is_empty());
    assert!(TaskStore::new(db).list(org.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn two_rules_on_same_trigger_both_fire() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let first = seed_member(&db, org.id, "First").await.unwrap();

    let workflow = WorkflowStore::new(db.clone());
    let role = workflow
        .create_role(
            org.id,
            NewRole {
                name: "Follow-up".to_string(),
                description: None,
                primary_member_id: Some(first.id),
                secondary_member_ids: vec![],
            },
        )
        .await
        .unwrap();

    for (title, role_id) in [
        ("Call the insured", Some(role.id)),
        ("Update claim file", None),
    ] {
        workflow
            .create_rule(
                org.id,
                NewRule {
                    activity_type: ActivityType::ResponseFavorable.as_str().to_string(),
                    task_title: title.to_string(),
                    task_description: None,
                    role_id,
                    category: TaskCategory::FollowUp,
                    priority: TaskPriority::Medium,
                    due_in_days: None,
                },
            )
            .await
            .unwrap();
    }

    let log = ActivityStore::new(db.clone())
        .create(
            org.id,
            NewActivityLog {
                client_id: None,
                activity_type: ActivityType::ResponseFavorable,
                subject: None,
                description: None,
                outcome: None,
                contact_method: None,
                duration_minutes: None,
                performed_by: None,
                performed_at: None,
            },
        )
        .await
        .unwrap();

    let created = workflow.apply_to_log(&log).await.unwrap();
    assert_eq!(created.len(), 2);

    let assigned: Vec<_> = created.iter().map(|t| t.assigned_to).collect();
    assert!(assigned.contains(&Some(first.id)));
    assert!(assigned.contains(&None));
}

#[tokio::test]
async fn disabling_a_rule_stops_new_tasks_but_keeps_old_ones() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();

    let workflow = WorkflowStore::new(db.clone());
    let rule = workflow
        .create_rule(
            org.id,
            NewRule {
                activity_type: ActivityType::ReleaseLetterRequired.as_str().to_string(),
                task_title: "Draft release letter".to_string(),
                task_description: None,
                role_id: None,
                category: TaskCategory::Documentation,
                priority: TaskPriority::High,
                due_in_days: None,
            },
        )
        .await
        .unwrap();

    let activity = ActivityStore::new(db.clone());
    let make_log = || NewActivityLog {
        client_id: None,
        activity_type: ActivityType::ReleaseLetterRequired,
        subject: None,
        description: None,
        outcome: None,
        contact_method: None,
        duration_minutes: None,
        performed_by: None,
        performed_at: None,
    };

    let log = activity.create(org.id, make_log()).await.unwrap();
    let first_batch = workflow.apply_to_log(&log).await.unwrap();
    assert_eq!(first_batch.len(), 1);

    workflow
        .update_rule(
            org.id,
            rule.id,
            UpdateRule {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let log = activity.create(org.id, make_log()).await.unwrap();
    let second_batch = workflow.apply_to_log(&log).await.unwrap();
    assert!(second_batch.is_empty());

    // The task from the first firing is untouched.
    let tasks = TaskStore::new(db).list(org.id).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, first_batch[0].id);
}

#[tokio::test]
async fn role_with_no_primary_yields_unassigned_task() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let backup = seed_member(&db, org.id, "Backup").await.unwrap();

    let workflow = WorkflowStore::new(db.clone());
    // Role with only a secondary member: secondaries never receive
    // automatic assignment.
    let role = workflow
        .create_role(
            org.id,
            NewRole {
                name: "Appraisal".to_string(),
                description: None,
                primary_member_id: None,
                secondary_member_ids: vec![backup.id],
            },
        )
        .await
        .unwrap();

    workflow
        .create_rule(
            org.id,
            NewRule {
                activity_type: ActivityType::AppraisalStarted.as_str().to_string(),
                task_title: "Open appraisal file".to_string(),
                task_description: None,
                role_id: Some(role.id),
                category: TaskCategory::Other,
                priority: TaskPriority::Medium,
                due_in_days: None,
            },
        )
        .await
        .unwrap();

    let log = ActivityStore::new(db.clone())
        .create(
            org.id,
            NewActivityLog {
                client_id: None,
                activity_type: ActivityType::AppraisalStarted,
                subject: None,
                description: None,
                outcome: None,
                contact_method: None,
                duration_minutes: None,
                performed_by: None,
                performed_at: None,
            },
        )
        .await
        .unwrap();

    let created = workflow.apply_to_log(&log).await.unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].assigned_to, None);
}
