use std::collections::BTreeMap;

use serde::Serialize;

use super::entities::WeeklyLesson;

// 课时视图：附带班级/科目/教师名称
#[derive(Debug, Clone, Serialize)]
pub struct LessonView {
    #[serde(flatten)]
    pub lesson: WeeklyLesson,
    pub class_name: String,
    pub subject_name: String,
    pub teacher_name: String,
}

// 教师的课表：按 weekday (0-6) 分组
#[derive(Debug, Clone, Serialize)]
pub struct MyLessonsResponse {
    pub lessons: Vec<LessonView>,
    pub lessons_by_weekday: BTreeMap<i32, Vec<LessonView>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingDay {
    pub day: &'static str,
    pub weekday: i32,
    pub lessons: Vec<LessonView>,
}

// 学生的"接下来一周"视图，从今天开始滚动 7 天
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingLessonsResponse {
    pub lessons: Vec<LessonView>,
    pub upcoming: Vec<UpcomingDay>,
}
