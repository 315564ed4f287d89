use serde::Serialize;

use super::entities::{ClassShift, ClassStatus, EducationLevel, SchoolClass};
use crate::models::students::entities::StudentStatus;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::ProfilePhoto;

// 班级摘要（嵌在学生/教师档案里）
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub id: i64,
    pub name: String,
    pub school_year: i32,
    pub shift: ClassShift,
    pub education_level: EducationLevel,
    pub status: ClassStatus,
}

impl From<&SchoolClass> for ClassSummary {
    fn from(class: &SchoolClass) -> Self {
        Self {
            id: class.id,
            name: class.name.clone(),
            school_year: class.school_year,
            shift: class.shift,
            education_level: class.education_level,
            status: class.status,
        }
    }
}

// 班级详情中的学生条目
#[derive(Debug, Clone, Serialize)]
pub struct ClassStudentItem {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub status: StudentStatus,
    pub photo: Option<ProfilePhoto>,
}

// 班级详情中的教师条目
#[derive(Debug, Clone, Serialize)]
pub struct ClassTeacherItem {
    pub teacher_id: i64,
    pub name: String,
    pub photo: Option<ProfilePhoto>,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassDetail {
    #[serde(flatten)]
    pub class: SchoolClass,
    pub students: Vec<ClassStudentItem>,
    pub teachers: Vec<ClassTeacherItem>,
    pub subjects: Vec<Subject>,
}

// 列表项：班级 + 成员数量
#[derive(Debug, Clone, Serialize)]
pub struct ClassListItem {
    #[serde(flatten)]
    pub class: SchoolClass,
    pub student_count: usize,
    pub teacher_count: usize,
    pub subjects: Vec<String>,
}
