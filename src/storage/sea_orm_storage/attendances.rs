use super::SeaOrmStorage;
use crate::entity::attendances::{ActiveModel, Column, Entity as Attendances};
use crate::errors::{Result, SchoolSystemError};
use crate::models::attendance::{entities::Attendance, requests::AttendanceListQuery};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 查某学生在某天某班级某科目的出勤记录
    pub async fn find_attendance_on_impl(
        &self,
        student_id: i64,
        class_id: i64,
        subject_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Option<Attendance>> {
        let result = Attendances::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询出勤记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn create_attendance_impl(
        &self,
        student_id: i64,
        teacher_id: i64,
        class_id: i64,
        subject_id: i64,
        date: chrono::NaiveDate,
        present: bool,
    ) -> Result<Attendance> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            teacher_id: Set(teacher_id),
            class_id: Set(class_id),
            subject_id: Set(subject_id),
            date: Set(date),
            present: Set(present),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建出勤记录失败: {e}")))?;

        Ok(result.into_attendance())
    }

    pub async fn set_attendance_present_impl(
        &self,
        id: i64,
        present: bool,
    ) -> Result<Option<Attendance>> {
        let existing = self.get_attendance_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            present: Set(present),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新出勤记录失败: {e}")))?;

        self.get_attendance_by_id_impl(id).await
    }

    /// 列出出勤记录（日期倒序）
    pub async fn list_attendances_impl(
        &self,
        teacher_id: Option<i64>,
        student_id: Option<i64>,
        query: &AttendanceListQuery,
        present: Option<bool>,
    ) -> Result<Vec<Attendance>> {
        let mut select = Attendances::find();

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(date_from) = query.date_from {
            select = select.filter(Column::Date.gte(date_from));
        }
        if let Some(date_to) = query.date_to {
            select = select.filter(Column::Date.lte(date_to));
        }
        if let Some(present) = present {
            select = select.filter(Column::Present.eq(present));
        }

        let result = select
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询出勤列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attendance()).collect())
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        let result = Attendances::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询出勤记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = Attendances::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除出勤记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
