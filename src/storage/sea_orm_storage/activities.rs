use super::SeaOrmStorage;
use crate::entity::activities::{ActiveModel, Column, Entity as Activities};
use crate::errors::{Result, SchoolSystemError};
use crate::models::activities::{
    entities::{Activity, ActivityStatus},
    requests::{ActivityListQuery, CreateActivityRequest, UpdateActivityRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建活动
    pub async fn create_activity_impl(
        &self,
        req: &CreateActivityRequest,
        teacher_id: i64,
    ) -> Result<Activity> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.clone()),
            kind: Set(req.kind.to_string()),
            slot: Set(req.slot.to_string()),
            date: Set(req.date),
            start_time: Set(req.start_time.clone()),
            end_time: Set(req.end_time.clone()),
            teacher_id: Set(teacher_id),
            subject_id: Set(req.subject_id),
            class_id: Set(req.class_id),
            semester: Set(req.semester.to_string()),
            status: Set(ActivityStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_activity())
    }

    /// 同槽位同学期同班级同科目的 active 活动查重
    pub async fn find_active_slot_duplicate_impl(
        &self,
        req: &CreateActivityRequest,
    ) -> Result<Option<Activity>> {
        let result = Activities::find()
            .filter(Column::Slot.eq(req.slot.to_string()))
            .filter(Column::Semester.eq(req.semester.to_string()))
            .filter(Column::ClassId.eq(req.class_id))
            .filter(Column::SubjectId.eq(req.subject_id))
            .filter(Column::Status.eq(ActivityStatus::Active.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("活动查重失败: {e}")))?;

        Ok(result.map(|m| m.into_activity()))
    }

    pub async fn get_activity_by_id_impl(&self, id: i64) -> Result<Option<Activity>> {
        let result = Activities::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_activity()))
    }

    /// 列出活动（日期倒序）
    pub async fn list_activities_impl(
        &self,
        teacher_id: Option<i64>,
        class_id: Option<i64>,
        query: &ActivityListQuery,
    ) -> Result<Vec<Activity>> {
        let mut select = Activities::find();

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(query_class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(query_class_id));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester.to_string()));
        }
        if let Some(kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }

        let result = select
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_activity()).collect())
    }

    /// 班级的全部未取消活动
    pub async fn activities_of_class_impl(&self, class_id: i64) -> Result<Vec<Activity>> {
        let result = Activities::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Status.ne(ActivityStatus::Cancelled.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询班级活动失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_activity()).collect())
    }

    /// 某日某班级某科目的 active 活动
    pub async fn activities_on_date_impl(
        &self,
        class_id: i64,
        subject_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Vec<Activity>> {
        let result = Activities::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::Date.eq(date))
            .filter(Column::Status.eq(ActivityStatus::Active.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询当日活动失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_activity()).collect())
    }

    pub async fn update_activity_impl(
        &self,
        id: i64,
        update: &UpdateActivityRequest,
    ) -> Result<Option<Activity>> {
        let existing = self.get_activity_by_id_impl(id).await?;
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
        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(start_time) = &update.start_time {
            model.start_time = Set(start_time.clone());
        }
        if let Some(end_time) = &update.end_time {
            model.end_time = Set(end_time.clone());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新活动失败: {e}")))?;

        self.get_activity_by_id_impl(id).await
    }

    pub async fn delete_activity_impl(&self, id: i64) -> Result<bool> {
        let result = Activities::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除活动失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
