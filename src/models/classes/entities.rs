use serde::{Deserialize, Serialize};

use crate::string_enum;

string_enum! {
    // 上课时段
    ClassShift {
        Morning => "morning",
        Afternoon => "afternoon",
        Evening => "evening",
        FullTime => "full_time",
    }
}

string_enum! {
    // 教育阶段
    EducationLevel {
        Kindergarten => "kindergarten",
        Elementary => "elementary",
        HighSchool => "high_school",
    }
}

impl EducationLevel {
    /// 展示用名称（错误信息里使用）
    pub fn display_name(&self) -> &'static str {
        match self {
            EducationLevel::Kindergarten => "Kindergarten",
            EducationLevel::Elementary => "Elementary",
            EducationLevel::HighSchool => "High School",
        }
    }
}

string_enum! {
    ClassStatus {
        Active => "active",
        Closed => "closed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: i64,
    pub name: String,
    pub school_year: i32,
    pub shift: ClassShift,
    pub education_level: EducationLevel,
    pub status: ClassStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
