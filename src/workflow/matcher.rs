//! Automation rule matching.
//!
//! The matching step is a pure function over the triggering log, the
//! organization's rules, and the role-to-primary-member map, so its
//! behavior is testable without a database. Persistence lives in
//! [`WorkflowStore::apply_to_log`](super::WorkflowStore::apply_to_log).

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::entities::{activity_log, automation_rule};
use crate::tasks::{TaskCategory, TaskPriority};

/// A task an automation rule decided to create.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSeed {
    pub rule_id: i32,
    pub client_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub assigned_to: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Evaluate automation rules against one activity log.
///
/// Every active rule whose `activity_type` equals the log's type fires
/// independently; there is no de-duplication or ordering between rules.
/// `primaries` maps role id to that role's primary member. A rule with no
/// role, or whose role has no primary, yields an unassigned task rather
/// than an error.
#[must_use]
pub fn plan_tasks(
    log: &activity_log::Model,
    rules: &[automation_rule::Model],
    primaries: &HashMap<i32, i32>,
) -> Vec<TaskSeed> {
    rules
        .iter()
        .filter(|rule| rule.is_active && rule.activity_type == log.activity_type)
        .map(|rule| TaskSeed {
            rule_id: rule.id,
            client_id: log.client_id.clone(),
            title: rule.task_title.clone(),
            description: rule.task_description.clone(),
            category: rule.category.parse().unwrap_or_default(),
            priority: rule.priority.parse().unwrap_or_default(),
            assigned_to: rule.role_id.and_then(|role_id| primaries.get(&role_id).copied()),
            due_date: rule
                .due_in_days
                .map(|days| log.performed_at + Duration::days(i64::from(days))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn log(activity_type: &str) -> activity_log::Model {
        activity_log::Model {
            id: 1,
            organization_id: 1,
            client_id: Some("CH20250114JD".to_string()),
            activity_type: activity_type.to_string(),
            subject: None,
            description: None,
            outcome: None,
            contact_method: None,
            duration_minutes: None,
            performed_by: Some(9),
            performed_at: Utc.with_ymd_and_hms(2025, 1, 14, 12, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 14, 12, 0, 0).unwrap(),
        }
    }

    fn rule(id: i32, activity_type: &str, role_id: Option<i32>, is_active: bool) -> automation_rule::Model {
        automation_rule::Model {
            id,
            organization_id: 1,
            activity_type: activity_type.to_string(),
            task_title: format!("Task from rule {}", id),
            task_description: None,
            role_id,
            category: "FOLLOW_UP".to_string(),
            priority: "HIGH".to_string(),
            due_in_days: Some(3),
            is_active,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_no_matching_rule_creates_nothing() {
        let rules = vec![rule(1, "SCOPE_RECEIVED", None, true)];
        let seeds = plan_tasks(&log("SCOPE_REQUESTED"), &rules, &HashMap::new());
        assert!(seeds.is_empty());
    }

    #[test]
    fn test_two_matching_rules_both_fire() {
        let mut primaries = HashMap::new();
        primaries.insert(10, 100);
        primaries.insert(20, 200);

        let rules = vec![
            rule(1, "SCOPE_RECEIVED", Some(10), true),
            rule(2, "SCOPE_RECEIVED", Some(20), true),
        ];
        let seeds = plan_tasks(&log("SCOPE_RECEIVED"), &rules, &primaries);

        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].assigned_to, Some(100));
        assert_eq!(seeds[1].assigned_to, Some(200));
    }

    #[test]
    fn test_role_without_primary_yields_unassigned_task() {
        let rules = vec![rule(1, "RESPONSE_FAVORABLE", Some(10), true)];
        let seeds = plan_tasks(&log("RESPONSE_FAVORABLE"), &rules, &HashMap::new());

        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].assigned_to, None);
    }

    #[test]
    fn test_null_role_yields_unassigned_task() {
        let rules = vec![rule(1, "ITEL_REQUESTED", None, true)];
        let seeds = plan_tasks(&log("ITEL_REQUESTED"), &rules, &HashMap::new());

        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].assigned_to, None);
    }

    #[test]
    fn test_inactive_rule_does_not_fire() {
        let rules = vec![
            rule(1, "APPRAISAL_STARTED", None, false),
            rule(2, "APPRAISAL_STARTED", None, true),
        ];
        let seeds = plan_tasks(&log("APPRAISAL_STARTED"), &rules, &HashMap::new());

        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].rule_id, 2);
    }

    #[test]
    fn test_due_date_is_log_date_plus_offset() {
        let rules = vec![rule(1, "SCOPE_SENT", None, true)];
        let seeds = plan_tasks(&log("SCOPE_SENT"), &rules, &HashMap::new());

        let expected = Utc.with_ymd_and_hms(2025, 1, 17, 12, 0, 0).unwrap();
        assert_eq!(seeds[0].due_date, Some(expected));
    }

    #[test]
    fn test_rule_without_due_offset_has_no_due_date() {
        let mut no_due = rule(1, "SCOPE_SENT", None, true);
        no_due.due_in_days = None;
        let seeds = plan_tasks(&log("SCOPE_SENT"), &[no_due], &HashMap::new());
        assert_eq!(seeds[0].due_date, None);
    }

    #[test]
    fn test_template_fields_carry_over() {
        let rules = vec![rule(7, "RELEASE_LETTER_REQUIRED", None, true)];
        let seeds = plan_tasks(&log("RELEASE_LETTER_REQUIRED"), &rules, &HashMap::new());

        assert_eq!(seeds[0].title, "Task from rule 7");
        assert_eq!(seeds[0].category, TaskCategory::FollowUp);
        assert_eq!(seeds[0].priority, TaskPriority::High);
        assert_eq!(seeds[0].client_id.as_deref(), Some("CH20250114JD"));
    }

    #[test]
    fn test_unknown_template_enums_fall_back_to_defaults() {
        let mut odd = rule(1, "SCOPE_RECEIVED", None, true);
        odd.category = "LEGACY".to_string();
        odd.priority = "".to_string();
        let seeds = plan_tasks(&log("SCOPE_RECEIVED"), &[odd], &HashMap::new());

        assert_eq!(seeds[0].category, TaskCategory::Other);
        assert_eq!(seeds[0].priority, TaskPriority::Medium);
    }
}
