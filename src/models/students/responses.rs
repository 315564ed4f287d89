use serde::{Deserialize, Serialize};

use super::entities::Student;
use crate::models::classes::responses::ClassSummary;
use crate::models::guardians::responses::GuardianSummary;
use crate::models::users::entities::User;

// 学生档案：用户信息 + 当前班级 + 监护人
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: Student,
    pub user: User,
    pub class: Option<ClassSummary>,
    pub guardians: Vec<GuardianSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentMutationResponse {
    pub user_id: i64,
    pub student_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleActiveResponse {
    pub active: bool,
    pub student: StudentProfile,
}

/// 成绩单上单个槽位（PV1..TB2）的标记
///
/// 序列化规则沿用原有约定：`*` 表示该槽位未安排活动，`-` 表示已安排
/// 但尚未评分，否则输出数值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotMark {
    NotScheduled,
    Ungraded,
    Score(f64),
}

impl SlotMark {
    pub fn value(&self) -> Option<f64> {
        match self {
            SlotMark::Score(v) => Some(*v),
            _ => None,
        }
    }
}

impl Serialize for SlotMark {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            SlotMark::NotScheduled => serializer.serialize_str("*"),
            SlotMark::Ungraded => serializer.serialize_str("-"),
            SlotMark::Score(v) => serializer.serialize_f64(*v),
        }
    }
}

// 学期小结：五个槽位 + 出勤率 + 学期均分
#[derive(Debug, Clone, Serialize)]
pub struct SemesterSummary {
    pub pv1: SlotMark,
    pub pv2: SlotMark,
    pub pv3: SlotMark,
    pub tb1: SlotMark,
    pub tb2: SlotMark,
    pub attendance: f64,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectSituation {
    InProgress,
    Approved,
    Failed,
}

// 成绩单中每个科目的一行
#[derive(Debug, Clone, Serialize)]
pub struct SubjectReportRow {
    pub subject_id: i64,
    pub subject_name: String,
    pub semester1: SemesterSummary,
    pub semester2: SemesterSummary,
    pub final_average: Option<f64>,
    pub situation: SubjectSituation,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectHeader {
    pub id: i64,
    pub name: String,
}

// 完整成绩单响应；学生没有班级时三个字段均为空
#[derive(Debug, Clone, Serialize)]
pub struct ReportCardResponse {
    pub class: Option<ClassSummary>,
    pub subjects: Vec<SubjectHeader>,
    pub report: Vec<SubjectReportRow>,
}

impl ReportCardResponse {
    pub fn empty() -> Self {
        Self {
            class: None,
            subjects: Vec::new(),
            report: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_mark_serialization() {
        assert_eq!(
            serde_json::to_string(&SlotMark::NotScheduled).unwrap(),
            "\"*\""
        );
        assert_eq!(serde_json::to_string(&SlotMark::Ungraded).unwrap(), "\"-\"");
        assert_eq!(serde_json::to_string(&SlotMark::Score(7.5)).unwrap(), "7.5");
    }

    #[test]
    fn test_situation_serialization() {
        assert_eq!(
            serde_json::to_string(&SubjectSituation::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}
