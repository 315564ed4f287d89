use serde::{Deserialize, Serialize};

use crate::models::activities::entities::ActivityKind;
use crate::string_enum;

string_enum! {
    // 成绩状态
    // 考试用 present / missed，作业用 delivered / not_delivered
    ScoreStatus {
        Present => "present",
        Missed => "missed",
        Delivered => "delivered",
        NotDelivered => "not_delivered",
        Pending => "pending",
    }
}

impl ScoreStatus {
    /// 该状态是否适用于给定的活动类型
    pub fn valid_for(&self, kind: ActivityKind) -> bool {
        match kind {
            ActivityKind::Exam => {
                matches!(self, Self::Present | Self::Missed | Self::Pending)
            }
            ActivityKind::Assignment => {
                matches!(self, Self::Delivered | Self::NotDelivered | Self::Pending)
            }
        }
    }

    /// 缺考/未交对应的状态
    pub fn absent_for(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Exam => Self::Missed,
            ActivityKind::Assignment => Self::NotDelivered,
        }
    }

    /// 有成绩时对应的状态
    pub fn graded_for(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Exam => Self::Present,
            ActivityKind::Assignment => Self::Delivered,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityScore {
    pub id: i64,
    pub value: Option<f64>,
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub activity_id: i64,
    pub period: String,
    pub status: ScoreStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ActivityScore {
    /// 计算均分时该成绩是否可计入
    pub fn countable(&self, kind: ActivityKind) -> bool {
        self.value.is_some() && self.status == ScoreStatus::graded_for(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_validity() {
        assert!(ScoreStatus::Present.valid_for(ActivityKind::Exam));
        assert!(!ScoreStatus::Present.valid_for(ActivityKind::Assignment));
        assert!(ScoreStatus::Pending.valid_for(ActivityKind::Exam));
        assert!(ScoreStatus::Pending.valid_for(ActivityKind::Assignment));
    }

    #[test]
    fn test_absent_status() {
        assert_eq!(
            ScoreStatus::absent_for(ActivityKind::Exam),
            ScoreStatus::Missed
        );
        assert_eq!(
            ScoreStatus::absent_for(ActivityKind::Assignment),
            ScoreStatus::NotDelivered
        );
    }
}
