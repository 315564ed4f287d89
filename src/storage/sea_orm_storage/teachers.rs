use super::SeaOrmStorage;
use crate::entity::teacher_subjects;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SchoolSystemError};
use crate::models::teachers::entities::{Teacher, TeacherStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, user_id: i64) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(user_id),
            status: Set(TeacherStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn list_teachers_impl(&self, status: Option<TeacherStatus>) -> Result<Vec<Teacher>> {
        let mut select = Teachers::find();

        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let result = select
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_teacher()).collect())
    }

    pub async fn set_teacher_status_impl(&self, id: i64, status: TeacherStatus) -> Result<bool> {
        let result = Teachers::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新教师状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 整体替换教师的科目关联
    pub async fn set_teacher_subjects_impl(
        &self,
        teacher_id: i64,
        subject_ids: &[i64],
    ) -> Result<()> {
        teacher_subjects::Entity::delete_many()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("清除科目关联失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        for subject_id in subject_ids {
            let link = teacher_subjects::ActiveModel {
                teacher_id: Set(teacher_id),
                subject_id: Set(*subject_id),
                created_at: Set(now),
                ..Default::default()
            };
            link.insert(&self.db).await.map_err(|e| {
                SchoolSystemError::database_operation(format!("写入科目关联失败: {e}"))
            })?;
        }

        Ok(())
    }

    pub async fn subject_ids_of_teacher_impl(&self, teacher_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = teacher_subjects::Entity::find()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
            .select_only()
            .column(teacher_subjects::Column::SubjectId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询科目关联失败: {e}")))?;

        Ok(ids)
    }

    /// 讲授某科目的全部教师
    pub async fn teachers_of_subject_impl(&self, subject_id: i64) -> Result<Vec<Teacher>> {
        let teacher_ids: Vec<i64> = teacher_subjects::Entity::find()
            .filter(teacher_subjects::Column::SubjectId.eq(subject_id))
            .select_only()
            .column(teacher_subjects::Column::TeacherId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询科目关联失败: {e}")))?;

        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Teachers::find()
            .filter(Column::Id.is_in(teacher_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_teacher()).collect())
    }

    pub async fn count_teachers_impl(&self) -> Result<u64> {
        let count = Teachers::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计教师数量失败: {e}")))?;

        Ok(count)
    }
}
