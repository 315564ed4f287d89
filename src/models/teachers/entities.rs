use serde::{Deserialize, Serialize};

use crate::string_enum;

string_enum! {
    // 教师在职状态
    TeacherStatus {
        Active => "active",
        OnLeave => "on_leave",
        Dismissed => "dismissed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub status: TeacherStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
