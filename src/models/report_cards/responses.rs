use serde::Serialize;

use super::entities::ReportCard;
use crate::models::activity_scores::responses::ScoreView;

// 成绩聚合视图：附带科目/班级名称和成绩明细
#[derive(Debug, Clone, Serialize)]
pub struct ReportCardView {
    #[serde(flatten)]
    pub report_card: ReportCard,
    pub subject_name: String,
    pub class_name: String,
    pub scores: Vec<ScoreView>,
}
