use serde::{Deserialize, Serialize};

// 学生在一个科目/班级/学期上的成绩聚合
//
// 同一 (student, subject, class, period) 组合唯一；其成绩集合就是
// activity_scores 表中同组合的行，均分在成绩变动时重算。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCard {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub period: String,
    pub final_average: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
