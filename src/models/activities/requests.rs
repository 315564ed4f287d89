use serde::Deserialize;

use super::entities::{ActivityKind, ActivitySlot, ActivityStatus};
use crate::models::Semester;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityRequest {
    pub name: String,
    pub kind: ActivityKind,
    pub slot: ActivitySlot,
    pub date: chrono::NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: i64,
    pub class_id: i64,
    pub semester: Semester,
    // 管理员创建时可以指定教师
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub date: Option<chrono::NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActivityListQuery {
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub semester: Option<Semester>,
    pub kind: Option<ActivityKind>,
}
