use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::{class_students, class_subjects, class_teachers};
use crate::errors::{Result, SchoolSystemError};
use crate::models::SortOrder;
use crate::models::classes::{
    entities::{ClassShift, ClassStatus, EducationLevel, SchoolClass},
    requests::{ClassListQuery, UpdateClassRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(
        &self,
        name: &str,
        school_year: i32,
        shift: ClassShift,
        education_level: EducationLevel,
    ) -> Result<SchoolClass> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(name.to_string()),
            school_year: Set(school_year),
            shift: Set(shift.to_string()),
            education_level: Set(education_level.to_string()),
            status: Set(ClassStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<SchoolClass>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 同名同学年同阶段的班级查重
    pub async fn find_class_duplicate_impl(
        &self,
        name: &str,
        school_year: i32,
        education_level: EducationLevel,
    ) -> Result<Option<SchoolClass>> {
        let result = Classes::find()
            .filter(Column::Name.eq(name))
            .filter(Column::SchoolYear.eq(school_year))
            .filter(Column::EducationLevel.eq(education_level.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("班级查重失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn list_classes_impl(&self, query: &ClassListQuery) -> Result<Vec<SchoolClass>> {
        let mut select = Classes::find();

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(level) = query.education_level {
            select = select.filter(Column::EducationLevel.eq(level.to_string()));
        }
        if let Some(year) = query.school_year {
            select = select.filter(Column::SchoolYear.eq(year));
        }
        if let Some(shift) = query.shift {
            select = select.filter(Column::Shift.eq(shift.to_string()));
        }

        select = match query.order.unwrap_or_default() {
            SortOrder::AZ => select.order_by_asc(Column::Name),
            SortOrder::ZA => select.order_by_desc(Column::Name),
            SortOrder::Recent => select.order_by_desc(Column::CreatedAt),
            SortOrder::Oldest => select.order_by_asc(Column::CreatedAt),
        };

        let result = select
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    pub async fn update_class_impl(
        &self,
        id: i64,
        update: &UpdateClassRequest,
    ) -> Result<Option<SchoolClass>> {
        let existing = self.get_class_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = &update.name {
            model.name = Set(name.clone());
        }
        if let Some(shift) = update.shift {
            model.shift = Set(shift.to_string());
        }
        if let Some(level) = update.education_level {
            model.education_level = Set(level.to_string());
        }
        if let Some(year) = update.school_year {
            model.school_year = Set(year);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新班级失败: {e}")))?;

        self.get_class_by_id_impl(id).await
    }

    pub async fn delete_class_impl(&self, id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 整体替换班级学生名单
    pub async fn set_class_students_impl(&self, class_id: i64, student_ids: &[i64]) -> Result<()> {
        class_students::Entity::delete_many()
            .filter(class_students::Column::ClassId.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("清除班级学生失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        for student_id in student_ids {
            let link = class_students::ActiveModel {
                class_id: Set(class_id),
                student_id: Set(*student_id),
                created_at: Set(now),
                ..Default::default()
            };
            link.insert(&self.db).await.map_err(|e| {
                SchoolSystemError::database_operation(format!("写入班级学生失败: {e}"))
            })?;
        }

        Ok(())
    }

    /// 整体替换班级教师名单
    pub async fn set_class_teachers_impl(&self, class_id: i64, teacher_ids: &[i64]) -> Result<()> {
        class_teachers::Entity::delete_many()
            .filter(class_teachers::Column::ClassId.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("清除班级教师失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        for teacher_id in teacher_ids {
            let link = class_teachers::ActiveModel {
                class_id: Set(class_id),
                teacher_id: Set(*teacher_id),
                created_at: Set(now),
                ..Default::default()
            };
            link.insert(&self.db).await.map_err(|e| {
                SchoolSystemError::database_operation(format!("写入班级教师失败: {e}"))
            })?;
        }

        Ok(())
    }

    /// 整体替换班级科目
    pub async fn set_class_subjects_impl(&self, class_id: i64, subject_ids: &[i64]) -> Result<()> {
        class_subjects::Entity::delete_many()
            .filter(class_subjects::Column::ClassId.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("清除班级科目失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        for subject_id in subject_ids {
            let link = class_subjects::ActiveModel {
                class_id: Set(class_id),
                subject_id: Set(*subject_id),
                created_at: Set(now),
                ..Default::default()
            };
            link.insert(&self.db).await.map_err(|e| {
                SchoolSystemError::database_operation(format!("写入班级科目失败: {e}"))
            })?;
        }

        Ok(())
    }

    /// 幂等地把教师加入班级
    pub async fn add_class_teacher_impl(&self, class_id: i64, teacher_id: i64) -> Result<()> {
        let existing = class_teachers::Entity::find()
            .filter(class_teachers::Column::ClassId.eq(class_id))
            .filter(class_teachers::Column::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级教师失败: {e}")))?;

        if existing.is_some() {
            return Ok(());
        }

        let link = class_teachers::ActiveModel {
            class_id: Set(class_id),
            teacher_id: Set(teacher_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        link.insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("写入班级教师失败: {e}")))?;

        Ok(())
    }

    pub async fn student_ids_of_class_impl(&self, class_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = class_students::Entity::find()
            .filter(class_students::Column::ClassId.eq(class_id))
            .select_only()
            .column(class_students::Column::StudentId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(ids)
    }

    pub async fn teacher_ids_of_class_impl(&self, class_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = class_teachers::Entity::find()
            .filter(class_teachers::Column::ClassId.eq(class_id))
            .select_only()
            .column(class_teachers::Column::TeacherId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级教师失败: {e}")))?;

        Ok(ids)
    }

    pub async fn subject_ids_of_class_impl(&self, class_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = class_subjects::Entity::find()
            .filter(class_subjects::Column::ClassId.eq(class_id))
            .select_only()
            .column(class_subjects::Column::SubjectId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级科目失败: {e}")))?;

        Ok(ids)
    }

    /// 学生的班级履历（学年倒序、名称升序）
    pub async fn classes_of_student_impl(&self, student_id: i64) -> Result<Vec<SchoolClass>> {
        let class_ids: Vec<i64> = class_students::Entity::find()
            .filter(class_students::Column::StudentId.eq(student_id))
            .select_only()
            .column(class_students::Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生班级失败: {e}")))?;

        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Classes::find()
            .filter(Column::Id.is_in(class_ids))
            .order_by_desc(Column::SchoolYear)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    /// 教师作为成员所在的班级
    pub async fn classes_of_teacher_impl(&self, teacher_id: i64) -> Result<Vec<SchoolClass>> {
        let class_ids: Vec<i64> = class_teachers::Entity::find()
            .filter(class_teachers::Column::TeacherId.eq(teacher_id))
            .select_only()
            .column(class_teachers::Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教师班级失败: {e}")))?;

        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Classes::find()
            .filter(Column::Id.is_in(class_ids))
            .order_by_desc(Column::SchoolYear)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    /// 学生在某学年的在读班级（status = active）
    pub async fn active_class_of_student_impl(
        &self,
        student_id: i64,
        school_year: i32,
    ) -> Result<Option<SchoolClass>> {
        let class_ids: Vec<i64> = class_students::Entity::find()
            .filter(class_students::Column::StudentId.eq(student_id))
            .select_only()
            .column(class_students::Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生班级失败: {e}")))?;

        if class_ids.is_empty() {
            return Ok(None);
        }

        let result = Classes::find()
            .filter(Column::Id.is_in(class_ids))
            .filter(Column::SchoolYear.eq(school_year))
            .filter(Column::Status.eq(ClassStatus::Active.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 学生在某学年的任意班级（不限状态）
    pub async fn class_of_student_in_year_impl(
        &self,
        student_id: i64,
        school_year: i32,
    ) -> Result<Option<SchoolClass>> {
        let class_ids: Vec<i64> = class_students::Entity::find()
            .filter(class_students::Column::StudentId.eq(student_id))
            .select_only()
            .column(class_students::Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生班级失败: {e}")))?;

        if class_ids.is_empty() {
            return Ok(None);
        }

        let result = Classes::find()
            .filter(Column::Id.is_in(class_ids))
            .filter(Column::SchoolYear.eq(school_year))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn count_classes_impl(&self) -> Result<u64> {
        let count = Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计班级数量失败: {e}")))?;

        Ok(count)
    }
}
