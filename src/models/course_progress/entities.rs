use serde::{Deserialize, Serialize};

use crate::models::courses::entities::{Course, LessonKind};
use crate::string_enum;

string_enum! {
    ProgressStatus {
        InProgress => "in_progress",
        Completed => "completed",
    }
}

// 指向课程内某一课时的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPointer {
    pub chapter_position: i32,
    pub lesson_position: i32,
}

// 已完成的课时记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedLesson {
    pub chapter_position: i32,
    pub lesson_position: i32,
    pub kind: LessonKind,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub video_timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProgress {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub completed_lessons: Vec<CompletedLesson>,
    pub last_viewed: Option<LessonPointer>,
    pub status: ProgressStatus,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub progress_percent: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl CourseProgress {
    pub fn find_completed(&self, chapter: i32, lesson: i32) -> Option<usize> {
        self.completed_lessons
            .iter()
            .position(|l| l.chapter_position == chapter && l.lesson_position == lesson)
    }

    /// 按课程课时总数重算进度百分比与完成状态
    pub fn recalculate(&mut self, course: &Course) {
        let total = course.total_lessons();
        let done = self.completed_lessons.len();

        self.progress_percent = if total > 0 {
            ((done as f64 / total as f64) * 100.0).round() as i32
        } else {
            0
        };

        if total > 0 && done >= total {
            self.status = ProgressStatus::Completed;
            if self.completed_at.is_none() {
                self.completed_at = Some(chrono::Utc::now());
            }
        } else {
            self.status = ProgressStatus::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::{CourseChapter, CourseLesson, CourseStatus};

    fn course_with_lessons(count: usize) -> Course {
        Course {
            id: 1,
            title: "t".into(),
            description: None,
            subject_id: 1,
            teacher_id: 1,
            cover: None,
            chapters: vec![CourseChapter {
                title: "c".into(),
                position: 1,
                locked: false,
                admin_locked: false,
                lessons: (0..count)
                    .map(|i| CourseLesson {
                        kind: LessonKind::Text,
                        title: format!("l{i}"),
                        content: "x".into(),
                        duration_minutes: 1,
                        position: i as i32 + 1,
                    })
                    .collect(),
            }],
            status: CourseStatus::Active,
            admin_locked: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn progress_with_done(done: usize) -> CourseProgress {
        CourseProgress {
            id: 1,
            student_id: 1,
            course_id: 1,
            completed_lessons: (0..done)
                .map(|i| CompletedLesson {
                    chapter_position: 1,
                    lesson_position: i as i32 + 1,
                    kind: LessonKind::Text,
                    completed_at: chrono::Utc::now(),
                    video_timestamp: 0,
                })
                .collect(),
            last_viewed: None,
            status: ProgressStatus::InProgress,
            completed_at: None,
            progress_percent: 0,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_recalculate_percent() {
        let course = course_with_lessons(4);
        let mut progress = progress_with_done(1);
        progress.recalculate(&course);
        assert_eq!(progress.progress_percent, 25);
        assert_eq!(progress.status, ProgressStatus::InProgress);
        assert!(progress.completed_at.is_none());
    }

    #[test]
    fn test_recalculate_completion() {
        let course = course_with_lessons(3);
        let mut progress = progress_with_done(3);
        progress.recalculate(&course);
        assert_eq!(progress.progress_percent, 100);
        assert_eq!(progress.status, ProgressStatus::Completed);
        assert!(progress.completed_at.is_some());
    }

    #[test]
    fn test_recalculate_empty_course() {
        let course = course_with_lessons(0);
        let mut progress = progress_with_done(0);
        progress.recalculate(&course);
        assert_eq!(progress.progress_percent, 0);
        assert_eq!(progress.status, ProgressStatus::InProgress);
    }
}
