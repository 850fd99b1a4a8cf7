//! Workflow role and automation rule persistence, plus rule application.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use std::collections::HashMap;
use validator::Validate;

use super::matcher::plan_tasks;
use crate::entities::{activity_log, automation_rule, task, workflow_role, workflow_role_member};
use crate::error::{AppError, Result};
use crate::tasks::{TaskCategory, TaskPriority, TaskStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct NewRole {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub primary_member_id: Option<i32>,
    #[serde(default)]
    pub secondary_member_ids: Vec<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRole {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    /// When present, replaces the role's member set.
    pub primary_member_id: Option<i32>,
    pub secondary_member_ids: Option<Vec<i32>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewRule {
    #[validate(length(min = 1, max = 50))]
    pub activity_type: String,
    #[validate(length(min = 1, max = 200))]
    pub task_title: String,
    pub task_description: Option<String>,
    pub role_id: Option<i32>,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    #[validate(range(min = 0, max = 365))]
    pub due_in_days: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRule {
    #[validate(length(min = 1, max = 50))]
    pub activity_type: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub task_title: Option<String>,
    pub task_description: Option<String>,
    pub role_id: Option<i32>,
    pub category: Option<TaskCategory>,
    pub priority: Option<TaskPriority>,
    #[validate(range(min = 0, max = 365))]
    pub due_in_days: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct WorkflowStore {
    db: DatabaseConnection,
}

impl WorkflowStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // === Roles ===

    pub async fn list_roles(&self, org_id: i32) -> Result<Vec<workflow_role::Model>> {
        Ok(workflow_role::Entity::find()
            .filter(workflow_role::Column::OrganizationId.eq(org_id))
            .order_by_asc(workflow_role::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn get_role(&self, org_id: i32, role_id: i32) -> Result<workflow_role::Model> {
        workflow_role::Entity::find_by_id(role_id)
            .filter(workflow_role::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Workflow role not found"))
    }

    pub async fn create_role(&self, org_id: i32, data: NewRole) -> Result<workflow_role::Model> {
        let role = workflow_role::ActiveModel {
            organization_id: Set(org_id),
            name: Set(data.name),
            description: Set(data.description),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        self.replace_role_members(
            org_id,
            role.id,
            data.primary_member_id,
            &data.secondary_member_ids,
        )
        .await?;

        tracing::info!(org_id, role_id = role.id, "workflow role created");
        Ok(role)
    }

    pub async fn update_role(
        &self,
        org_id: i32,
        role_id: i32,
        data: UpdateRole,
    ) -> Result<workflow_role::Model> {
        let existing = self.get_role(org_id, role_id).await?;

        let replace_members =
            data.primary_member_id.is_some() || data.secondary_member_ids.is_some();
        let primary = data.primary_member_id;
        let secondaries = data.secondary_member_ids.clone().unwrap_or_default();

        let mut active: workflow_role::ActiveModel = existing.into();
        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(description) = data.description {
            active.description = Set(Some(description));
        }
        if let Some(is_active) = data.is_active {
            active.is_active = Set(is_active);
        }
        let updated = active.update(&self.db).await?;

        if replace_members {
            self.replace_role_members(org_id, role_id, primary, &secondaries)
                .await?;
        }

        Ok(updated)
    }

    pub async fn delete_role(&self, org_id: i32, role_id: i32) -> Result<()> {
        let existing = self.get_role(org_id, role_id).await?;

        let txn = self.db.begin().await?;
        workflow_role_member::Entity::delete_many()
            .filter(workflow_role_member::Column::RoleId.eq(role_id))
            .exec(&txn)
            .await?;
        workflow_role::Entity::delete_by_id(existing.id).exec(&txn).await?;
        txn.commit().await?;

        Ok(())
    }

    /// Replace the role's member set: one optional primary plus secondaries.
    ///
    /// The primary is excluded from the secondary list so a member can hold
    /// only one slot per role.
    pub async fn replace_role_members(
        &self,
        org_id: i32,
        role_id: i32,
        primary_member_id: Option<i32>,
        secondary_member_ids: &[i32],
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        workflow_role_member::Entity::delete_many()
            .filter(workflow_role_member::Column::RoleId.eq(role_id))
            .exec(&txn)
            .await?;

        if let Some(primary) = primary_member_id {
            workflow_role_member::ActiveModel {
                organization_id: Set(org_id),
                role_id: Set(role_id),
                member_id: Set(primary),
                is_primary: Set(true),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        let mut seen = Vec::new();
        for &member_id in secondary_member_ids {
            if Some(member_id) == primary_member_id || seen.contains(&member_id) {
                continue;
            }
            seen.push(member_id);
            workflow_role_member::ActiveModel {
                organization_id: Set(org_id),
                role_id: Set(role_id),
                member_id: Set(member_id),
                is_primary: Set(false),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    pub async fn list_role_members(
        &self,
        org_id: i32,
        role_id: i32,
    ) -> Result<Vec<workflow_role_member::Model>> {
        Ok(workflow_role_member::Entity::find()
            .filter(workflow_role_member::Column::OrganizationId.eq(org_id))
            .filter(workflow_role_member::Column::RoleId.eq(role_id))
            .all(&self.db)
            .await?)
    }

    pub async fn list_all_role_members(
        &self,
        org_id: i32,
    ) -> Result<Vec<workflow_role_member::Model>> {
        Ok(workflow_role_member::Entity::find()
            .filter(workflow_role_member::Column::OrganizationId.eq(org_id))
            .all(&self.db)
            .await?)
    }

    /// Map role id to primary member id for the organization.
    pub async fn primary_members(&self, org_id: i32) -> Result<HashMap<i32, i32>> {
        let rows = workflow_role_member::Entity::find()
            .filter(workflow_role_member::Column::OrganizationId.eq(org_id))
            .filter(workflow_role_member::Column::IsPrimary.eq(true))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|m| (m.role_id, m.member_id)).collect())
    }

    // === Rules ===

    pub async fn list_rules(&self, org_id: i32) -> Result<Vec<automation_rule::Model>> {
        Ok(automation_rule::Entity::find()
            .filter(automation_rule::Column::OrganizationId.eq(org_id))
            .order_by_asc(automation_rule::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn get_rule(&self, org_id: i32, rule_id: i32) -> Result<automation_rule::Model> {
        automation_rule::Entity::find_by_id(rule_id)
            .filter(automation_rule::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Automation rule not found"))
    }

    pub async fn create_rule(&self, org_id: i32, data: NewRule) -> Result<automation_rule::Model> {
        if let Some(role_id) = data.role_id {
            self.get_role(org_id, role_id).await?;
        }

        Ok(automation_rule::ActiveModel {
            organization_id: Set(org_id),
            activity_type: Set(data.activity_type),
            task_title: Set(data.task_title),
            task_description: Set(data.task_description),
            role_id: Set(data.role_id),
            category: Set(data.category.as_str().to_string()),
            priority: Set(data.priority.as_str().to_string()),
            due_in_days: Set(data.due_in_days),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn update_rule(
        &self,
        org_id: i32,
        rule_id: i32,
        data: UpdateRule,
    ) -> Result<automation_rule::Model> {
        let existing = self.get_rule(org_id, rule_id).await?;

        if let Some(role_id) = data.role_id {
            self.get_role(org_id, role_id).await?;
        }

        let mut active: automation_rule::ActiveModel = existing.into();
        if let Some(activity_type) = data.activity_type {
            active.activity_type = Set(activity_type);
        }
        if let Some(task_title) = data.task_title {
            active.task_title = Set(task_title);
        }
        if let Some(task_description) = data.task_description {
            active.task_description = Set(Some(task_description));
        }
        if let Some(role_id) = data.role_id {
            active.role_id = Set(Some(role_id));
        }
        if let Some(category) = data.category {
            active.category = Set(category.as_str().to_string());
        }
        if let Some(priority) = data.priority {
            active.priority = Set(priority.as_str().to_string());
        }
        if let Some(due_in_days) = data.due_in_days {
            active.due_in_days = Set(Some(due_in_days));
        }
        if let Some(is_active) = data.is_active {
            active.is_active = Set(is_active);
        }

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_rule(&self, org_id: i32, rule_id: i32) -> Result<()> {
        let existing = self.get_rule(org_id, rule_id).await?;
        automation_rule::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    // === Application ===

    /// Run automation rules for a freshly created activity log, persisting
    /// one task per matching rule. Returns the created tasks.
    pub async fn apply_to_log(&self, log: &activity_log::Model) -> Result<Vec<task::Model>> {
        let rules = automation_rule::Entity::find()
            .filter(automation_rule::Column::OrganizationId.eq(log.organization_id))
            .filter(automation_rule::Column::ActivityType.eq(&log.activity_type))
            .filter(automation_rule::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;

        if rules.is_empty() {
            return Ok(Vec::new());
        }

        let primaries = self.primary_members(log.organization_id).await?;
        let seeds = plan_tasks(log, &rules, &primaries);

        let now = Utc::now();
        let mut created = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let model = task::ActiveModel {
                organization_id: Set(log.organization_id),
                client_id: Set(seed.client_id),
                title: Set(seed.title),
                description: Set(seed.description),
                category: Set(seed.category.as_str().to_string()),
                priority: Set(seed.priority.as_str().to_string()),
                status: Set(TaskStatus::Pending.as_str().to_string()),
                assigned_to: Set(seed.assigned_to),
                due_date: Set(seed.due_date),
                completed_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await?;

            tracing::info!(
                org_id = log.organization_id,
                rule_id = seed.rule_id,
                task_id = model.id,
                "automation rule created task"
            );
            created.push(model);
        }

        Ok(created)
    }
}
