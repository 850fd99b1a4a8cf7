//! Construction project and material order persistence.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::types::{MaterialItem, PermitStatus, ProjectStatus};
use crate::entities::{construction_project, material_order};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProject {
    pub client_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub project_name: String,
    pub property_address: Option<String>,
    pub roof_type: Option<String>,
    pub roof_color: Option<String>,
    #[validate(range(min = 0))]
    pub roof_squares: Option<i32>,
    pub siding_type: Option<String>,
    pub siding_color: Option<String>,
    #[validate(range(min = 0))]
    pub siding_squares: Option<i32>,
    pub permit_number: Option<String>,
    #[serde(default)]
    pub permit_status: PermitStatus,
    pub permit_date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub estimated_completion_date: Option<DateTime<Utc>>,
    pub actual_completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub project_status: ProjectStatus,
    pub estimated_cost: Option<i64>,
    pub actual_cost: Option<i64>,
    pub contractor: Option<String>,
    pub project_manager: Option<String>,
    pub notes: Option<String>,
    pub special_requirements: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    pub client_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub project_name: Option<String>,
    pub property_address: Option<String>,
    pub roof_type: Option<String>,
    pub roof_color: Option<String>,
    #[validate(range(min = 0))]
    pub roof_squares: Option<i32>,
    pub siding_type: Option<String>,
    pub siding_color: Option<String>,
    #[validate(range(min = 0))]
    pub siding_squares: Option<i32>,
    pub permit_number: Option<String>,
    pub permit_status: Option<PermitStatus>,
    pub permit_date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub estimated_completion_date: Option<DateTime<Utc>>,
    pub actual_completion_date: Option<DateTime<Utc>>,
    pub project_status: Option<ProjectStatus>,
    pub estimated_cost: Option<i64>,
    pub actual_cost: Option<i64>,
    pub contractor: Option<String>,
    pub project_manager: Option<String>,
    pub notes: Option<String>,
    pub special_requirements: Option<String>,
}

#[derive(Clone)]
pub struct ConstructionStore {
    db: DatabaseConnection,
}

impl ConstructionStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, org_id: i32) -> Result<Vec<construction_project::Model>> {
        Ok(construction_project::Entity::find()
            .filter(construction_project::Column::OrganizationId.eq(org_id))
            .order_by_desc(construction_project::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn get(&self, org_id: i32, id: i32) -> Result<construction_project::Model> {
        construction_project::Entity::find_by_id(id)
            .filter(construction_project::Column::OrganizationId.eq(org_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Construction project not found"))
    }

    pub async fn find_by_client(
        &self,
        org_id: i32,
        client_id: &str,
    ) -> Result<Option<construction_project::Model>> {
        Ok(construction_project::Entity::find()
            .filter(construction_project::Column::OrganizationId.eq(org_id))
            .filter(construction_project::Column::ClientId.eq(client_id))
            .one(&self.db)
            .await?)
    }

    pub async fn search(&self, org_id: i32, term: &str) -> Result<Vec<construction_project::Model>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list(org_id).await;
        }
        Ok(construction_project::Entity::find()
            .filter(construction_project::Column::OrganizationId.eq(org_id))
            .filter(construction_project::Column::ProjectName.contains(term))
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, org_id: i32, data: NewProject) -> Result<construction_project::Model> {
        let now = Utc::now();
        Ok(construction_project::ActiveModel {
            organization_id: Set(org_id),
            client_id: Set(data.client_id),
            project_name: Set(data.project_name),
            property_address: Set(data.property_address),
            roof_type: Set(data.roof_type),
            roof_color: Set(data.roof_color),
            roof_squares: Set(data.roof_squares),
            siding_type: Set(data.siding_type),
            siding_color: Set(data.siding_color),
            siding_squares: Set(data.siding_squares),
            permit_number: Set(data.permit_number),
            permit_status: Set(data.permit_status.as_str().to_string()),
            permit_date: Set(data.permit_date),
            start_date: Set(data.start_date),
            estimated_completion_date: Set(data.estimated_completion_date),
            actual_completion_date: Set(data.actual_completion_date),
            project_status: Set(data.project_status.as_str().to_string()),
            estimated_cost: Set(data.estimated_cost),
            actual_cost: Set(data.actual_cost),
            contractor: Set(data.contractor),
            project_manager: Set(data.project_manager),
            notes: Set(data.notes),
            special_requirements: Set(data.special_requirements),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }

    pub async fn update(
        &self,
        org_id: i32,
        id: i32,
        data: UpdateProject,
    ) -> Result<construction_project::Model> {
        let existing = self.get(org_id, id).await?;
        let mut active: construction_project::ActiveModel = existing.into();

        macro_rules! set_if_some {
            ($field:ident) => {
                if let Some(value) = data.$field {
                    active.$field = Set(Some(value));
                }
            };
        }

        if let Some(project_name) = data.project_name {
            active.project_name = Set(project_name);
        }
        if let Some(permit_status) = data.permit_status {
            active.permit_status = Set(permit_status.as_str().to_string());
        }
        if let Some(project_status) = data.project_status {
            active.project_status = Set(project_status.as_str().to_string());
        }

        set_if_some!(client_id);
        set_if_some!(property_address);
        set_if_some!(roof_type);
        set_if_some!(roof_color);
        set_if_some!(roof_squares);
        set_if_some!(siding_type);
        set_if_some!(siding_color);
        set_if_some!(siding_squares);
        set_if_some!(permit_number);
        set_if_some!(permit_date);
        set_if_some!(start_date);
        set_if_some!(estimated_completion_date);
        set_if_some!(actual_completion_date);
        set_if_some!(estimated_cost);
        set_if_some!(actual_cost);
        set_if_some!(contractor);
        set_if_some!(project_manager);
        set_if_some!(notes);
        set_if_some!(special_requirements);

        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    // === Material orders ===

    pub async fn find_material_order(
        &self,
        org_id: i32,
        project_id: i32,
    ) -> Result<Option<material_order::Model>> {
        Ok(material_order::Entity::find()
            .filter(material_order::Column::OrganizationId.eq(org_id))
            .filter(material_order::Column::ConstructionProjectId.eq(project_id))
            .one(&self.db)
            .await?)
    }

    /// Save the material order for a project, replacing any existing line
    /// list. The generated bill of materials is only a seed; whatever the
    /// user settled on is what gets stored.
    pub async fn save_material_order(
        &self,
        org_id: i32,
        project_id: i32,
        items: Vec<MaterialItem>,
    ) -> Result<material_order::Model> {
        // Project must exist and belong to the organization.
        self.get(org_id, project_id).await?;

        let items_json = serde_json::to_value(&items)?;
        let now = Utc::now();

        match self.find_material_order(org_id, project_id).await? {
            Some(existing) => {
                let mut active: material_order::ActiveModel = existing.into();
                active.items = Set(items_json);
                active.updated_at = Set(now);
                Ok(active.update(&self.db).await?)
            }
            None => Ok(material_order::ActiveModel {
                organization_id: Set(org_id),
                construction_project_id: Set(project_id),
                items: Set(items_json),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await?),
        }
    }
}
