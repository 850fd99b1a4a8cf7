//! Task persistence.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::types::{TaskCategory, TaskPriority, TaskStatus};
use crate::entities::task;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTask {
    pub client_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    pub assigned_to: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    pub client_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<TaskCategory>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct TaskStore {
    db: DatabaseConnection,
}

impl TaskStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, org_id: i32) -> Result<Vec<task::Model>> {
        Ok(task::Entity::find()
            .filter(task::Column::OrganizationId.eq(org_id))
            .order_by_desc(task::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// One page of tasks plus the total count, newest first.
    pub async fn list_page(
        &self,
        org_id: i32,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<task::Model>, u64)> {
        let query = task::Entity::find()
            .filter(task::Column::OrganizationId.eq(org_id))
            .order_by_desc(task::Column::CreatedAt);

        let total = query.clone().count(&self.db).await?;
        let items = query.offset(offset).limit(limit).all(&self.db).await?;
        Ok((items, total))
    }

    pub async fn get(&self, org_id: i32, id: i32) -> Result<task::Model> {
        task::Entity::find_by_id(id)
            .filter(task::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))
    }

    pub async fn list_by_assignee(&self, org_id: i32, member_id: i32) -> Result<Vec<task::Model>> {
        Ok(task::Entity::find()
            .filter(task::Column::OrganizationId.eq(org_id))
            .filter(task::Column::AssignedTo.eq(member_id))
            .order_by_desc(task::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_client(&self, org_id: i32, client_id: &str) -> Result<Vec<task::Model>> {
        Ok(task::Entity::find()
            .filter(task::Column::OrganizationId.eq(org_id))
            .filter(task::Column::ClientId.eq(client_id))
            .order_by_desc(task::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, org_id: i32, data: NewTask) -> Result<task::Model> {
        let now = Utc::now();
        Ok(task::ActiveModel {
            organization_id: Set(org_id),
            client_id: Set(data.client_id),
            title: Set(data.title),
            description: Set(data.description),
            category: Set(data.category.as_str().to_string()),
            priority: Set(data.priority.as_str().to_string()),
            status: Set(data.status.as_str().to_string()),
            assigned_to: Set(data.assigned_to),
            due_date: Set(data.due_date),
            completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn update(&self, org_id: i32, id: i32, data: UpdateTask) -> Result<task::Model> {
        let existing = self.get(org_id, id).await?;
        let was_completed = existing.status == TaskStatus::Completed.as_str();
        let mut active: task::ActiveModel = existing.into();

        if let Some(client_id) = data.client_id {
            active.client_id = Set(Some(client_id));
        }
        if let Some(title) = data.title {
            active.title = Set(title);
        }
        if let Some(description) = data.description {
            active.description = Set(Some(description));
        }
        if let Some(category) = data.category {
            active.category = Set(category.as_str().to_string());
        }
        if let Some(priority) = data.priority {
            active.priority = Set(priority.as_str().to_string());
        }
        if let Some(status) = data.status {
            active.status = Set(status.as_str().to_string());
            // Stamp completion when the task first transitions to COMPLETED.
            if status == TaskStatus::Completed && !was_completed {
                active.completed_at = Set(Some(Utc::now()));
            }
        }
        if let Some(assigned_to) = data.assigned_to {
            active.assigned_to = Set(Some(assigned_to));
        }
        if let Some(due_date) = data.due_date {
            active.due_date = Set(Some(due_date));
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, org_id: i32, id: i32) -> Result<()> {
        let existing = self.get(org_id, id).await?;
        task::Entity::delete_by_id(existing.id).exec(&self.db).await?;
        Ok(())
    }
}
