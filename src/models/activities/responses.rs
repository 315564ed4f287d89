use serde::Serialize;

use super::entities::Activity;

// 活动视图：附带科目/班级名称
#[derive(Debug, Clone, Serialize)]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    pub subject_name: String,
    pub class_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityCreatedResponse {
    pub activity: Activity,
    pub scores_created: usize,
}
