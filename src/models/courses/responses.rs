use serde::Serialize;

use super::entities::Course;

// 课程视图：附带科目/教师名称和准入班级
#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    #[serde(flatten)]
    pub course: Course,
    pub subject_name: String,
    pub teacher_name: String,
    pub allowed_class_ids: Vec<i64>,
    pub enrolled_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentCheckResponse {
    pub enrolled: bool,
}
