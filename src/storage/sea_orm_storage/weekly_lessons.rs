use super::SeaOrmStorage;
use crate::entity::weekly_lessons::{ActiveModel, Column, Entity as WeeklyLessons};
use crate::errors::{Result, SchoolSystemError};
use crate::models::weekly_lessons::{
    entities::{LessonStatus, WeeklyLesson},
    requests::{CreateWeeklyLessonRequest, UpdateWeeklyLessonRequest, WeeklyLessonQuery},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建每周课时
    pub async fn create_weekly_lesson_impl(
        &self,
        req: &CreateWeeklyLessonRequest,
    ) -> Result<WeeklyLesson> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            weekday: Set(req.weekday),
            start_time: Set(req.start_time.clone()),
            end_time: Set(req.end_time.clone()),
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            semester: Set(req.semester.to_string()),
            status: Set(LessonStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建课时失败: {e}")))?;

        Ok(result.into_lesson())
    }

    /// 教师同一 weekday 时间段冲突检测（仅 active）
    ///
    /// "HH:MM" 补零后字符串比较与数值比较等价，可直接用 lt/gt。
    pub async fn find_teacher_time_conflict_impl(
        &self,
        teacher_id: i64,
        weekday: i32,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<WeeklyLesson>> {
        let result = WeeklyLessons::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Weekday.eq(weekday))
            .filter(Column::StartTime.lt(end_time))
            .filter(Column::EndTime.gt(start_time))
            .filter(Column::Status.eq(LessonStatus::Active.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("课时冲突检测失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    pub async fn get_weekly_lesson_by_id_impl(&self, id: i64) -> Result<Option<WeeklyLesson>> {
        let result = WeeklyLessons::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 列出 active 课时（weekday 升序、开始时刻升序）
    pub async fn list_weekly_lessons_impl(
        &self,
        teacher_id: Option<i64>,
        class_id: Option<i64>,
        query: &WeeklyLessonQuery,
    ) -> Result<Vec<WeeklyLesson>> {
        let mut select = WeeklyLessons::find();

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(query_class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(query_class_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(query_teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(query_teacher_id));
        }
        if let Some(weekday) = query.weekday {
            select = select.filter(Column::Weekday.eq(weekday));
        }

        let result = select
            .filter(Column::Status.eq(LessonStatus::Active.to_string()))
            .order_by_asc(Column::Weekday)
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课时列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_lesson()).collect())
    }

    pub async fn active_lessons_of_class_impl(&self, class_id: i64) -> Result<Vec<WeeklyLesson>> {
        let result = WeeklyLessons::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Status.eq(LessonStatus::Active.to_string()))
            .order_by_asc(Column::Weekday)
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级课时失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_lesson()).collect())
    }

    /// 某班级+科目的 active 课时，可限定教师
    pub async fn find_active_lesson_impl(
        &self,
        class_id: i64,
        subject_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<WeeklyLesson>> {
        let mut select = WeeklyLessons::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::Status.eq(LessonStatus::Active.to_string()));

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let result = select
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 教师有 active 课时的班级 ID 集合（去重）
    pub async fn class_ids_with_active_lessons_impl(&self, teacher_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = WeeklyLessons::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Status.eq(LessonStatus::Active.to_string()))
            .select_only()
            .column(Column::ClassId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教师班级失败: {e}")))?;

        Ok(ids)
    }

    pub async fn update_weekly_lesson_impl(
        &self,
        id: i64,
        update: &UpdateWeeklyLessonRequest,
    ) -> Result<Option<WeeklyLesson>> {
        let existing = self.get_weekly_lesson_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(weekday) = update.weekday {
            model.weekday = Set(weekday);
        }
        if let Some(start_time) = &update.start_time {
            model.start_time = Set(start_time.clone());
        }
        if let Some(end_time) = &update.end_time {
            model.end_time = Set(end_time.clone());
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新课时失败: {e}")))?;

        self.get_weekly_lesson_by_id_impl(id).await
    }

    pub async fn delete_weekly_lesson_impl(&self, id: i64) -> Result<bool> {
        let result = WeeklyLessons::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除课时失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
