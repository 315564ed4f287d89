use super::SeaOrmStorage;
use crate::entity::student_guardians;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolSystemError};
use crate::models::students::entities::{Student, StudentStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(
        &self,
        user_id: i64,
        class_id: Option<i64>,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(user_id),
            class_id: Set(class_id),
            status: Set(StudentStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_impl(&self, status: Option<StudentStatus>) -> Result<Vec<Student>> {
        let mut select = Students::find();

        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let result = select
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn set_student_status_impl(&self, id: i64, status: StudentStatus) -> Result<bool> {
        let result = Students::update_many()
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
            .map_err(|e| SchoolSystemError::database_operation(format!("更新学籍状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 整体替换学生的监护人关联
    pub async fn set_student_guardians_impl(
        &self,
        student_id: i64,
        guardian_ids: &[i64],
    ) -> Result<()> {
        student_guardians::Entity::delete_many()
            .filter(student_guardians::Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("清除监护人关联失败: {e}"))
            })?;

        let now = chrono::Utc::now().timestamp();
        for guardian_id in guardian_ids {
            let link = student_guardians::ActiveModel {
                student_id: Set(student_id),
                guardian_id: Set(*guardian_id),
                created_at: Set(now),
                ..Default::default()
            };
            link.insert(&self.db).await.map_err(|e| {
                SchoolSystemError::database_operation(format!("写入监护人关联失败: {e}"))
            })?;
        }

        Ok(())
    }

    pub async fn guardian_ids_of_student_impl(&self, student_id: i64) -> Result<Vec<i64>> {
        let links = student_guardians::Entity::find()
            .filter(student_guardians::Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询监护人关联失败: {e}"))
            })?;

        Ok(links.into_iter().map(|l| l.guardian_id).collect())
    }

    /// 幂等地添加一条学生-监护人关联
    pub async fn add_student_guardian_impl(&self, student_id: i64, guardian_id: i64) -> Result<()> {
        let existing = student_guardians::Entity::find()
            .filter(student_guardians::Column::StudentId.eq(student_id))
            .filter(student_guardians::Column::GuardianId.eq(guardian_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询监护人关联失败: {e}"))
            })?;

        if existing.is_some() {
            return Ok(());
        }

        let link = student_guardians::ActiveModel {
            student_id: Set(student_id),
            guardian_id: Set(guardian_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        link.insert(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("写入监护人关联失败: {e}"))
        })?;

        Ok(())
    }

    pub async fn remove_student_guardian_impl(
        &self,
        student_id: i64,
        guardian_id: i64,
    ) -> Result<()> {
        student_guardians::Entity::delete_many()
            .filter(student_guardians::Column::StudentId.eq(student_id))
            .filter(student_guardians::Column::GuardianId.eq(guardian_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("删除监护人关联失败: {e}"))
            })?;

        Ok(())
    }

    pub async fn count_students_impl(&self) -> Result<u64> {
        let count = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计学生数量失败: {e}")))?;

        Ok(count)
    }

    /// 按 ID 集合批量取学生
    pub(crate) async fn students_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Student>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Students::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    /// 某监护人名下的学生 ID 集合
    pub(crate) async fn student_ids_of_guardian_impl(&self, guardian_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = student_guardians::Entity::find()
            .filter(student_guardians::Column::GuardianId.eq(guardian_id))
            .select_only()
            .column(student_guardians::Column::StudentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询监护人关联失败: {e}"))
            })?;

        Ok(ids)
    }
}
