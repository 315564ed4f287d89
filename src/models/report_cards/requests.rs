use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportCardRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub period: String,
    // 管理员创建时可以指定教师
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateReportCardRequest {
    pub period: Option<String>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReportCardListQuery {
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub period: Option<String>,
}
