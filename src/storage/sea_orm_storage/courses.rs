use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::{course_classes, course_enrollments, teachers};
use crate::errors::{Result, SchoolSystemError};
use crate::models::courses::{
    entities::{Course, CourseStatus},
    requests::NewCourse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashSet;

impl SeaOrmStorage {
    /// 创建课程（章节整体序列化为 JSON）
    pub async fn create_course_impl(&self, course: NewCourse) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(course.title),
            description: Set(course.description),
            subject_id: Set(course.subject_id),
            teacher_id: Set(course.teacher_id),
            cover_url: Set(course.cover.as_ref().map(|c| c.url.clone())),
            cover_public_id: Set(course.cover.as_ref().map(|c| c.public_id.clone())),
            chapters: Set(serde_json::to_string(&course.chapters)?),
            status: Set(CourseStatus::Active.to_string()),
            admin_locked: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出课程（创建时间倒序）
    pub async fn list_courses_impl(
        &self,
        teacher_id: Option<i64>,
        allowed_class_id: Option<i64>,
        only_active: bool,
    ) -> Result<Vec<Course>> {
        let mut select = Courses::find();

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if only_active {
            select = select.filter(Column::Status.eq(CourseStatus::Active.to_string()));
        }
        if let Some(class_id) = allowed_class_id {
            let course_ids: Vec<i64> = course_classes::Entity::find()
                .filter(course_classes::Column::ClassId.eq(class_id))
                .select_only()
                .column(course_classes::Column::CourseId)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("查询课程准入失败: {e}"))
                })?;

            if course_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::Id.is_in(course_ids));
        }

        let result = select
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }

    /// 整体写回课程
    pub async fn save_course_impl(&self, course: &Course) -> Result<bool> {
        let model = ActiveModel {
            id: Set(course.id),
            title: Set(course.title.clone()),
            description: Set(course.description.clone()),
            subject_id: Set(course.subject_id),
            cover_url: Set(course.cover.as_ref().map(|c| c.url.clone())),
            cover_public_id: Set(course.cover.as_ref().map(|c| c.public_id.clone())),
            chapters: Set(serde_json::to_string(&course.chapters)?),
            status: Set(course.status.to_string()),
            admin_locked: Set(course.admin_locked),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("写回课程失败: {e}")))?;

        Ok(true)
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 整体替换课程的准入班级
    pub async fn set_course_classes_impl(&self, course_id: i64, class_ids: &[i64]) -> Result<()> {
        course_classes::Entity::delete_many()
            .filter(course_classes::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("清除课程准入失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        for class_id in class_ids {
            let link = course_classes::ActiveModel {
                course_id: Set(course_id),
                class_id: Set(*class_id),
                created_at: Set(now),
                ..Default::default()
            };
            link.insert(&self.db).await.map_err(|e| {
                SchoolSystemError::database_operation(format!("写入课程准入失败: {e}"))
            })?;
        }

        Ok(())
    }

    pub async fn class_ids_of_course_impl(&self, course_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = course_classes::Entity::find()
            .filter(course_classes::Column::CourseId.eq(course_id))
            .select_only()
            .column(course_classes::Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课程准入失败: {e}")))?;

        Ok(ids)
    }

    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<()> {
        let link = course_enrollments::ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        link.insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("课程报名失败: {e}")))?;

        Ok(())
    }

    pub async fn enrolled_student_ids_impl(&self, course_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = course_enrollments::Entity::find()
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .select_only()
            .column(course_enrollments::Column::StudentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询报名名单失败: {e}")))?;

        Ok(ids)
    }

    pub async fn is_student_enrolled_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let existing = course_enrollments::Entity::find()
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .filter(course_enrollments::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询报名失败: {e}")))?;

        Ok(existing.is_some())
    }

    pub async fn courses_of_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Course>> {
        let result = Courses::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教师课程失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn count_courses_of_teacher_impl(&self, teacher_id: i64) -> Result<u64> {
        let count = Courses::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计课程数量失败: {e}")))?;

        Ok(count)
    }

    /// 清理教师已不存在的孤儿课程，返回删除数量
    pub async fn delete_orphan_courses_impl(&self) -> Result<u64> {
        let teacher_ids: Vec<i64> = teachers::Entity::find()
            .select_only()
            .column(teachers::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教师失败: {e}")))?;
        let teacher_ids: HashSet<i64> = teacher_ids.into_iter().collect();

        let courses = Courses::find()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询课程失败: {e}")))?;

        let mut deleted = 0;
        for course in courses {
            if !teacher_ids.contains(&course.teacher_id) {
                self.delete_progress_of_course_impl(course.id).await?;
                Courses::delete_by_id(course.id)
                    .exec(&self.db)
                    .await
                    .map_err(|e| {
                        SchoolSystemError::database_operation(format!("删除孤儿课程失败: {e}"))
                    })?;
                deleted += 1;
            }
        }

        Ok(deleted)
    }
}
