use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User-adjustable material order for a construction project.
///
/// `items` holds the line list as JSON (`construction::MaterialItem`);
/// saving replaces the whole list, since the generated bill of materials is
/// only a seed the user edits freely.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    #[sea_orm(unique)]
    pub construction_project_id: i32,
    pub items: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
