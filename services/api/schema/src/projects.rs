use sea_orm::entity::prelude::*;

/// A collaboration listing owned by a profile.
///
/// Most columns are nullable: rows written by older clients may lack them, and the
/// service fills defaults when reading (`status` → planning, `created_at` → now).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_profile_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tags: Option<Json>,
    pub status: Option<String>,
    pub max_members: Option<i32>,
    pub current_members: Option<i32>,
    pub repository_url: Option<String>,
    pub contact_info: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::OwnerProfileId",
        to = "super::profiles::Column::Id",
        on_delete = "Cascade"
    )]
    Profiles,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
