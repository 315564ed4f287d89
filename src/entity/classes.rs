//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub school_year: i32,
    pub shift: String,
    pub education_level: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::class_students::Entity")]
    ClassStudents,
    #[sea_orm(has_many = "super::class_teachers::Entity")]
    ClassTeachers,
    #[sea_orm(has_many = "super::class_subjects::Entity")]
    ClassSubjects,
    #[sea_orm(has_many = "super::weekly_lessons::Entity")]
    WeeklyLessons,
    #[sea_orm(has_many = "super::activities::Entity")]
    Activities,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::SchoolClass {
        use crate::models::classes::entities::{
            ClassShift, ClassStatus, EducationLevel, SchoolClass,
        };
        use chrono::{DateTime, Utc};

        SchoolClass {
            id: self.id,
            name: self.name,
            school_year: self.school_year,
            shift: self.shift.parse::<ClassShift>().unwrap_or(ClassShift::Morning),
            education_level: self
                .education_level
                .parse::<EducationLevel>()
                .unwrap_or(EducationLevel::Elementary),
            status: self.status.parse::<ClassStatus>().unwrap_or(ClassStatus::Active),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
