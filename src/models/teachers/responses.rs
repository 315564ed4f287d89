use serde::Serialize;

use super::entities::Teacher;
use crate::models::classes::responses::ClassSummary;
use crate::models::courses::entities::Course;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::User;

// 教师档案：用户信息 + 科目 + 班级 + 所授课程
#[derive(Debug, Clone, Serialize)]
pub struct TeacherProfile {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub user: User,
    pub subjects: Vec<Subject>,
    pub classes: Vec<ClassSummary>,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherMutationResponse {
    pub user_id: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherToggleActiveResponse {
    pub active: bool,
    pub teacher: TeacherProfile,
}
