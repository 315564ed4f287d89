//! 监护人实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "guardians")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub cpf: String,
    pub phone: String,
    pub email: Option<String>,
    pub relationship: String,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_guardians::Entity")]
    StudentGuardians,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_guardian(self) -> crate::models::guardians::entities::Guardian {
        use crate::models::guardians::entities::{Guardian, GuardianRelationship};
        use chrono::{DateTime, Utc};

        Guardian {
            id: self.id,
            name: self.name,
            cpf: self.cpf,
            phone: self.phone,
            email: self.email,
            relationship: self
                .relationship
                .parse::<GuardianRelationship>()
                .unwrap_or(GuardianRelationship::Other),
            active: self.active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
