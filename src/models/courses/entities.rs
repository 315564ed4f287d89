use serde::{Deserialize, Serialize};

use crate::string_enum;

string_enum! {
    CourseStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

string_enum! {
    // 课时内容类型
    LessonKind {
        Video => "video",
        Text => "text",
    }
}

// 媒体托管上的资源引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAssetRef {
    pub url: String,
    pub public_id: String,
}

// 课时：视频课时的 content 是媒体 URL，文本课时的 content 是正文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseLesson {
    pub kind: LessonKind,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub duration_minutes: i32,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseChapter {
    pub title: String,
    pub position: i32,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub admin_locked: bool,
    #[serde(default)]
    pub lessons: Vec<CourseLesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub cover: Option<MediaAssetRef>,
    pub chapters: Vec<CourseChapter>,
    pub status: CourseStatus,
    pub admin_locked: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    /// 课程内的课时总数（视频 + 文本）
    pub fn total_lessons(&self) -> usize {
        self.chapters.iter().map(|c| c.lessons.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_json_roundtrip() {
        let json = r#"[{"title":"Intro","position":1,"lessons":[
            {"kind":"video","title":"Welcome","content":"https://media.example/v.mp4","duration_minutes":5,"position":1},
            {"kind":"text","title":"Reading","content":"Once upon a time","position":2}
        ]}]"#;
        let chapters: Vec<CourseChapter> = serde_json::from_str(json).unwrap();
        assert_eq!(chapters[0].lessons.len(), 2);
        assert_eq!(chapters[0].lessons[1].duration_minutes, 0);
        assert!(!chapters[0].locked);
    }
}
