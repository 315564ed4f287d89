use super::SeaOrmStorage;
use crate::entity::guardians::{ActiveModel, Column, Entity as Guardians};
use crate::errors::{Result, SchoolSystemError};
use crate::models::guardians::{
    entities::Guardian,
    requests::{CreateGuardianRequest, UpdateGuardianRequest},
};
use crate::models::students::entities::Student;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建监护人
    pub async fn create_guardian_impl(&self, req: &CreateGuardianRequest) -> Result<Guardian> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.clone()),
            cpf: Set(req.cpf.clone()),
            phone: Set(req.phone.clone()),
            email: Set(Some(req.email.clone())),
            relationship: Set(req.relationship.to_string()),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建监护人失败: {e}")))?;

        Ok(result.into_guardian())
    }

    pub async fn get_guardian_by_id_impl(&self, id: i64) -> Result<Option<Guardian>> {
        let result = Guardians::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询监护人失败: {e}")))?;

        Ok(result.map(|m| m.into_guardian()))
    }

    pub async fn get_guardians_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Guardian>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Guardians::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询监护人失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_guardian()).collect())
    }

    pub async fn get_guardian_by_cpf_impl(&self, cpf: &str) -> Result<Option<Guardian>> {
        let result = Guardians::find()
            .filter(Column::Cpf.eq(cpf))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询监护人失败: {e}")))?;

        Ok(result.map(|m| m.into_guardian()))
    }

    pub async fn get_guardian_by_phone_impl(&self, phone: &str) -> Result<Option<Guardian>> {
        let result = Guardians::find()
            .filter(Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询监护人失败: {e}")))?;

        Ok(result.map(|m| m.into_guardian()))
    }

    pub async fn get_guardian_by_email_impl(&self, email: &str) -> Result<Option<Guardian>> {
        let result = Guardians::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询监护人失败: {e}")))?;

        Ok(result.map(|m| m.into_guardian()))
    }

    /// 列出监护人，可按关联学生过滤
    pub async fn list_guardians_impl(&self, student_id: Option<i64>) -> Result<Vec<Guardian>> {
        let mut select = Guardians::find();

        if let Some(student_id) = student_id {
            let guardian_ids = self.guardian_ids_of_student_impl(student_id).await?;
            if guardian_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::Id.is_in(guardian_ids));
        }

        let result = select
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询监护人列表失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_guardian()).collect())
    }

    pub async fn update_guardian_impl(
        &self,
        id: i64,
        update: &UpdateGuardianRequest,
    ) -> Result<Option<Guardian>> {
        let existing = self.get_guardian_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(update.name.clone()),
            cpf: Set(update.cpf.clone()),
            phone: Set(update.phone.clone()),
            email: Set(Some(update.email.clone())),
            relationship: Set(update.relationship.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新监护人失败: {e}")))?;

        self.get_guardian_by_id_impl(id).await
    }

    pub async fn set_guardian_active_impl(&self, id: i64, active: bool) -> Result<Option<Guardian>> {
        let existing = self.get_guardian_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            active: Set(active),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model.update(&self.db).await.map_err(|e| {
            SchoolSystemError::database_operation(format!("更新监护人状态失败: {e}"))
        })?;

        self.get_guardian_by_id_impl(id).await
    }

    /// 监护人名下的学生
    pub async fn students_of_guardian_impl(&self, guardian_id: i64) -> Result<Vec<Student>> {
        let student_ids = self.student_ids_of_guardian_impl(guardian_id).await?;
        self.students_by_ids_impl(&student_ids).await
    }

    pub async fn delete_guardian_impl(&self, id: i64) -> Result<bool> {
        let result = Guardians::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除监护人失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
