use super::SeaOrmStorage;
use crate::entity::course_progress::{ActiveModel, Column, Entity as CourseProgressEntity};
use crate::errors::{Result, SchoolSystemError};
use crate::models::course_progress::{
    entities::{CourseProgress, ProgressStatus},
    requests::ProgressListQuery,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 建立进度行（报名时）
    pub async fn create_progress_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<CourseProgress> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            completed_lessons: Set("[]".to_string()),
            status: Set(ProgressStatus::InProgress.to_string()),
            progress_percent: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建进度失败: {e}")))?;

        Ok(result.into_progress())
    }

    pub async fn find_progress_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<CourseProgress>> {
        let result = CourseProgressEntity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询进度失败: {e}")))?;

        Ok(result.map(|m| m.into_progress()))
    }

    /// 整体写回进度
    pub async fn save_progress_impl(&self, progress: &CourseProgress) -> Result<bool> {
        let model = ActiveModel {
            id: Set(progress.id),
            completed_lessons: Set(serde_json::to_string(&progress.completed_lessons)?),
            last_chapter: Set(progress.last_viewed.map(|p| p.chapter_position)),
            last_lesson: Set(progress.last_viewed.map(|p| p.lesson_position)),
            status: Set(progress.status.to_string()),
            completed_at: Set(progress.completed_at.map(|t| t.timestamp())),
            progress_percent: Set(progress.progress_percent),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("写回进度失败: {e}")))?;

        Ok(true)
    }

    /// 列出进度（更新时间倒序）
    pub async fn list_progress_impl(&self, query: &ProgressListQuery) -> Result<Vec<CourseProgress>> {
        let mut select = CourseProgressEntity::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let result = select
            .order_by_desc(Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询进度列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_progress()).collect())
    }

    pub async fn progress_of_student_impl(&self, student_id: i64) -> Result<Vec<CourseProgress>> {
        let result = CourseProgressEntity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生进度失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_progress()).collect())
    }

    pub async fn delete_progress_of_course_impl(&self, course_id: i64) -> Result<u64> {
        let result = CourseProgressEntity::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除课程进度失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
