//! 每周课程表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weekly_lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    // 0 = 周日, 1 = 周一, ..., 6 = 周六
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub semester: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
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
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_lesson(self) -> crate::models::weekly_lessons::entities::WeeklyLesson {
        use crate::models::weekly_lessons::entities::{LessonStatus, WeeklyLesson};
        use crate::models::Semester;
        use chrono::{DateTime, Utc};

        WeeklyLesson {
            id: self.id,
            weekday: self.weekday,
            start_time: self.start_time,
            end_time: self.end_time,
            class_id: self.class_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            semester: self.semester.parse::<Semester>().unwrap_or(Semester::First),
            status: self
                .status
                .parse::<LessonStatus>()
                .unwrap_or(LessonStatus::Active),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
