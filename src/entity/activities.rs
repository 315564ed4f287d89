//! 活动实体（考试/作业）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub slot: String,
    pub date: Date,
    // "HH:MM"，补零后字符串比较与数值比较等价
    pub start_time: String,
    pub end_time: String,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub semester: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::activity_scores::Entity")]
    ActivityScores,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_activity(self) -> crate::models::activities::entities::Activity {
        use crate::models::activities::entities::{
            Activity, ActivityKind, ActivitySlot, ActivityStatus,
        };
        use crate::models::Semester;
        use chrono::{DateTime, Utc};

        Activity {
            id: self.id,
            name: self.name,
            kind: self.kind.parse::<ActivityKind>().unwrap_or(ActivityKind::Exam),
            slot: self.slot.parse::<ActivitySlot>().unwrap_or(ActivitySlot::Pv1),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            teacher_id: self.teacher_id,
            subject_id: self.subject_id,
            class_id: self.class_id,
            semester: self.semester.parse::<Semester>().unwrap_or(Semester::First),
            status: self
                .status
                .parse::<ActivityStatus>()
                .unwrap_or(ActivityStatus::Active),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
