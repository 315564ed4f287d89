use serde::{Deserialize, Serialize};

use crate::models::Semester;
use crate::string_enum;

string_enum! {
    // 活动类型：考试或作业
    ActivityKind {
        Exam => "exam",
        Assignment => "assignment",
    }
}

string_enum! {
    // 成绩单槽位：三次考试 + 两次作业
    ActivitySlot {
        Pv1 => "PV1",
        Pv2 => "PV2",
        Pv3 => "PV3",
        Tb1 => "TB1",
        Tb2 => "TB2",
    }
}

impl ActivitySlot {
    pub fn is_exam_slot(&self) -> bool {
        matches!(self, Self::Pv1 | Self::Pv2 | Self::Pv3)
    }
}

string_enum! {
    ActivityStatus {
        Active => "active",
        Cancelled => "cancelled",
        Completed => "completed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub kind: ActivityKind,
    pub slot: ActivitySlot,
    pub date: chrono::NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub semester: Semester,
    pub status: ActivityStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_classification() {
        assert!(ActivitySlot::Pv2.is_exam_slot());
        assert!(!ActivitySlot::Tb1.is_exam_slot());
    }

    #[test]
    fn test_slot_parse() {
        assert_eq!("TB2".parse::<ActivitySlot>().unwrap(), ActivitySlot::Tb2);
        assert!("TB3".parse::<ActivitySlot>().is_err());
    }
}
