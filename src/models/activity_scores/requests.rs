use serde::Deserialize;

use super::entities::ScoreStatus;
use crate::models::activities::entities::ActivityKind;

#[derive(Debug, Clone, Deserialize)]
pub struct SetScoreRequest {
    pub value: Option<f64>,
}

// 考试的到场/缺考标记
#[derive(Debug, Clone, Deserialize)]
pub struct SetPresenceRequest {
    pub status: ScoreStatus,
}

// 作业的交/未交标记
#[derive(Debug, Clone, Deserialize)]
pub struct SetDeliveryRequest {
    pub delivered: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateScoreRequest {
    // 缺省 = 不变，null = 清空分数
    #[serde(default, deserialize_with = "double_option")]
    pub value: Option<Option<f64>>,
    pub status: Option<ScoreStatus>,
}

/// serde 默认会把 null 解成外层 None；这里保留 Some(None) 以区分"清空"
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoreListQuery {
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub period: Option<String>,
    pub kind: Option<ActivityKind>,
    pub activity_id: Option<i64>,
}
