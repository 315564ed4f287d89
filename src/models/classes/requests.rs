use serde::Deserialize;

use super::entities::{ClassShift, ClassStatus, EducationLevel};
use crate::models::SortOrder;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub shift: ClassShift,
    pub education_level: EducationLevel,
    pub school_year: Option<i32>,
    #[serde(default)]
    pub student_ids: Vec<i64>,
    #[serde(default)]
    pub teacher_ids: Vec<i64>,
    #[serde(default)]
    pub subject_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub shift: Option<ClassShift>,
    pub education_level: Option<EducationLevel>,
    pub school_year: Option<i32>,
    pub status: Option<ClassStatus>,
    pub student_ids: Option<Vec<i64>>,
    pub teacher_ids: Option<Vec<i64>>,
    pub subject_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClassListQuery {
    pub status: Option<ClassStatus>,
    pub education_level: Option<EducationLevel>,
    pub school_year: Option<i32>,
    pub shift: Option<ClassShift>,
    pub order: Option<SortOrder>,
}
