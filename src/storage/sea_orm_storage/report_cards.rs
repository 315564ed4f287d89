use super::SeaOrmStorage;
use crate::entity::report_cards::{ActiveModel, Column, Entity as ReportCards};
use crate::errors::{Result, SchoolSystemError};
use crate::models::report_cards::{
    entities::ReportCard,
    requests::{ReportCardListQuery, UpdateReportCardRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建成绩单
    pub async fn create_report_card_impl(
        &self,
        student_id: i64,
        teacher_id: i64,
        subject_id: i64,
        class_id: i64,
        period: &str,
    ) -> Result<ReportCard> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            teacher_id: Set(teacher_id),
            subject_id: Set(subject_id),
            class_id: Set(class_id),
            period: Set(period.to_string()),
            final_average: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建成绩单失败: {e}")))?;

        Ok(result.into_report_card())
    }

    pub async fn get_report_card_by_id_impl(&self, id: i64) -> Result<Option<ReportCard>> {
        let result = ReportCards::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩单失败: {e}")))?;

        Ok(result.map(|m| m.into_report_card()))
    }

    /// 按唯一键 (student, subject, class, period) 查找
    pub async fn find_report_card_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        class_id: i64,
        period: &str,
    ) -> Result<Option<ReportCard>> {
        let result = ReportCards::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Period.eq(period))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩单失败: {e}")))?;

        Ok(result.map(|m| m.into_report_card()))
    }

    /// 列出成绩单（学期倒序、创建时间倒序）
    pub async fn list_report_cards_impl(
        &self,
        teacher_id: Option<i64>,
        student_id: Option<i64>,
        query: &ReportCardListQuery,
    ) -> Result<Vec<ReportCard>> {
        let mut select = ReportCards::find();

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(query_student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(query_student_id));
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

        let result = select
            .order_by_desc(Column::Period)
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询成绩单列表失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_report_card()).collect())
    }

    pub async fn update_report_card_impl(
        &self,
        id: i64,
        update: &UpdateReportCardRequest,
    ) -> Result<Option<ReportCard>> {
        let existing = self.get_report_card_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(period) = &update.period {
            model.period = Set(period.clone());
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新成绩单失败: {e}")))?;

        self.get_report_card_by_id_impl(id).await
    }

    /// 写回重算后的最终均分
    pub async fn set_final_average_impl(&self, id: i64, average: f64) -> Result<bool> {
        let result = ReportCards::update_many()
            .col_expr(Column::FinalAverage, sea_orm::sea_query::Expr::value(average))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新均分失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_report_card_impl(&self, id: i64) -> Result<bool> {
        let result = ReportCards::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除成绩单失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
