use serde::{Deserialize, Serialize};

use crate::string_enum;

string_enum! {
    // 学籍状态
    StudentStatus {
        Active => "active",
        Transferred => "transferred",
        Graduated => "graduated",
        Retained => "retained",
        Locked => "locked",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub class_id: Option<i64>,
    pub status: StudentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
