use super::SeaOrmStorage;
use crate::entity::activity_scores::{ActiveModel, Column, Entity as ActivityScores};
use crate::errors::{Result, SchoolSystemError};
use crate::models::activities::entities::Activity;
use crate::models::activity_scores::{
    entities::{ActivityScore, ScoreStatus},
    requests::ScoreListQuery,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 为学生在某次活动下建立成绩行
    pub async fn create_score_impl(
        &self,
        activity: &Activity,
        student_id: i64,
        period: &str,
        value: Option<f64>,
        status: ScoreStatus,
    ) -> Result<ActivityScore> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            value: Set(value),
            student_id: Set(student_id),
            teacher_id: Set(activity.teacher_id),
            subject_id: Set(activity.subject_id),
            class_id: Set(activity.class_id),
            activity_id: Set(activity.id),
            period: Set(period.to_string()),
            status: Set(status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建成绩失败: {e}")))?;

        Ok(result.into_score())
    }

    pub async fn get_score_by_id_impl(&self, id: i64) -> Result<Option<ActivityScore>> {
        let result = ActivityScores::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_score()))
    }

    /// 列出成绩（创建时间倒序）
    ///
    /// activity_ids 用于按活动类型过滤（服务层先查出对应类型的活动 ID 集合）。
    pub async fn list_scores_impl(
        &self,
        teacher_id: Option<i64>,
        query: &ScoreListQuery,
        activity_ids: Option<&[i64]>,
    ) -> Result<Vec<ActivityScore>> {
        let mut select = ActivityScores::find();

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(period) = &query.period {
            select = select.filter(Column::Period.eq(period.clone()));
        }
        if let Some(activity_id) = query.activity_id {
            select = select.filter(Column::ActivityId.eq(activity_id));
        }
        if let Some(ids) = activity_ids {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::ActivityId.is_in(ids.to_vec()));
        }

        let result = select
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_score()).collect())
    }

    pub async fn get_score_by_student_activity_impl(
        &self,
        student_id: i64,
        activity_id: i64,
    ) -> Result<Option<ActivityScore>> {
        let result = ActivityScores::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ActivityId.eq(activity_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_score()))
    }

    /// 更新成绩行；value 外层 None 表示不变，Some(None) 表示清空
    pub async fn update_score_impl(
        &self,
        id: i64,
        value: Option<Option<f64>>,
        status: Option<ScoreStatus>,
    ) -> Result<Option<ActivityScore>> {
        let existing = self.get_score_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(value) = value {
            model.value = Set(value);
        }
        if let Some(status) = status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新成绩失败: {e}")))?;

        self.get_score_by_id_impl(id).await
    }

    pub async fn delete_score_impl(&self, id: i64) -> Result<bool> {
        let result = ActivityScores::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除某次活动的全部成绩
    pub async fn delete_scores_of_activity_impl(&self, activity_id: i64) -> Result<u64> {
        let result = ActivityScores::delete_many()
            .filter(Column::ActivityId.eq(activity_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除活动成绩失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 某成绩单（学生/科目/班级/学期）关联的全部成绩
    pub async fn scores_for_report_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        class_id: i64,
        period: &str,
    ) -> Result<Vec<ActivityScore>> {
        let result = ActivityScores::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Period.eq(period))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_score()).collect())
    }

    /// 学生在某班级的全部成绩
    pub async fn scores_of_student_in_class_impl(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Vec<ActivityScore>> {
        let result = ActivityScores::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassId.eq(class_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_score()).collect())
    }
}
