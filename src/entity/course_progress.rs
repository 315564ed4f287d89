//! 课程进度实体
//!
//! 已完成课时列表以 JSON 文本存储，与课程章节的存储方式一致。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    #[sea_orm(column_type = "Text")]
    pub completed_lessons: String,
    pub last_chapter: Option<i32>,
    pub last_lesson: Option<i32>,
    pub status: String,
    pub completed_at: Option<i64>,
    pub progress_percent: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_progress(self) -> crate::models::course_progress::entities::CourseProgress {
        use crate::models::course_progress::entities::{
            CourseProgress, LessonPointer, ProgressStatus,
        };
        use chrono::{DateTime, Utc};

        let last_viewed = match (self.last_chapter, self.last_lesson) {
            (Some(chapter), Some(lesson)) => Some(LessonPointer {
                chapter_position: chapter,
                lesson_position: lesson,
            }),
            _ => None,
        };

        CourseProgress {
            id: self.id,
            student_id: self.student_id,
            course_id: self.course_id,
            completed_lessons: serde_json::from_str(&self.completed_lessons).unwrap_or_default(),
            last_viewed,
            status: self
                .status
                .parse::<ProgressStatus>()
                .unwrap_or(ProgressStatus::InProgress),
            completed_at: self
                .completed_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            progress_percent: self.progress_percent,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
