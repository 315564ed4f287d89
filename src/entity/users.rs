//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub age: Option<i32>,
    #[sea_orm(unique)]
    pub cpf: Option<String>,
    // 地址以 JSON 文本存储（原始数据是嵌套文档）
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub photo_public_id: Option<String>,
    pub active: bool,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_many = "super::teachers::Entity")]
    Teachers,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{ProfilePhoto, User, UserRole};
        use chrono::{DateTime, Utc};

        let photo = match (self.photo_url, self.photo_public_id) {
            (Some(url), Some(public_id)) => Some(ProfilePhoto { url, public_id }),
            _ => None,
        };

        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Student),
            age: self.age,
            cpf: self.cpf,
            address: self
                .address
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            photo,
            active: self.active,
            last_login_at: self
                .last_login_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
