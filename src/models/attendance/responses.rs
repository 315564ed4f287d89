use std::collections::BTreeMap;

use serde::Serialize;

use super::entities::Attendance;

// 出勤视图：附带班级/科目名称
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceView {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub class_name: String,
    pub subject_name: String,
    pub student_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkAttendanceResponse {
    pub records: Vec<Attendance>,
}

// 学生视角的缺勤汇总，按科目名称分组
#[derive(Debug, Clone, Serialize)]
pub struct AbsencesResponse {
    pub total_absences: usize,
    pub absences_by_subject: BTreeMap<String, Vec<AttendanceView>>,
    pub absences: Vec<AttendanceView>,
}
