use serde::{Deserialize, Serialize};

use crate::models::Semester;
use crate::string_enum;

string_enum! {
    LessonStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

// 每周固定课时。weekday: 0 = 周日 ... 6 = 周六，
// 与 chrono 的 num_days_from_sunday() 一致。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyLesson {
    pub id: i64,
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub semester: Semester,
    pub status: LessonStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// weekday 的展示名
pub fn weekday_name(weekday: i32) -> &'static str {
    match weekday {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}
