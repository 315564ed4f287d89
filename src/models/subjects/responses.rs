use serde::Serialize;

use super::entities::Subject;
use crate::models::teachers::entities::TeacherStatus;
use crate::models::users::entities::ProfilePhoto;

// 科目详情中的授课教师条目
#[derive(Debug, Clone, Serialize)]
pub struct SubjectTeacherItem {
    pub teacher_id: i64,
    pub name: String,
    pub status: TeacherStatus,
    pub photo: Option<ProfilePhoto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectWithTeachers {
    #[serde(flatten)]
    pub subject: Subject,
    pub teachers: Vec<SubjectTeacherItem>,
}
