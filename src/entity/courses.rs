//! 课程实体（自学内容课程）
//!
//! 章节与课时以 JSON 文本存储，原始数据是不带独立 id 的嵌套文档。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub cover_url: Option<String>,
    pub cover_public_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub chapters: String,
    pub status: String,
    pub admin_locked: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::course_classes::Entity")]
    CourseClasses,
    #[sea_orm(has_many = "super::course_enrollments::Entity")]
    CourseEnrollments,
    #[sea_orm(has_many = "super::course_progress::Entity")]
    CourseProgress,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::{Course, CourseStatus, MediaAssetRef};
        use chrono::{DateTime, Utc};

        let cover = match (self.cover_url, self.cover_public_id) {
            (Some(url), Some(public_id)) => Some(MediaAssetRef { url, public_id }),
            _ => None,
        };

        Course {
            id: self.id,
            title: self.title,
            description: self.description,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            cover,
            chapters: serde_json::from_str(&self.chapters).unwrap_or_default(),
            status: self
                .status
                .parse::<CourseStatus>()
                .unwrap_or(CourseStatus::Active),
            admin_locked: self.admin_locked,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
