use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub present: bool,
}

// 老师一次为整个班点名
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    pub class_id: i64,
    pub subject_id: i64,
    pub date: chrono::NaiveDate,
    pub entries: Vec<AttendanceEntry>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AttendanceListQuery {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub present: bool,
}
