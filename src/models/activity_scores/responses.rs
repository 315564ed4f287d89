use serde::Serialize;

use super::entities::ActivityScore;
use crate::models::activities::entities::{ActivityKind, ActivitySlot};

// 成绩条目上附带的活动摘要
#[derive(Debug, Clone, Serialize)]
pub struct ScoreActivitySummary {
    pub id: i64,
    pub name: String,
    pub kind: ActivityKind,
    pub slot: ActivitySlot,
    pub date: chrono::NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    #[serde(flatten)]
    pub score: ActivityScore,
    pub activity: Option<ScoreActivitySummary>,
    pub subject_name: String,
    pub student_name: String,
}
