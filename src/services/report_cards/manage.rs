use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::ReportCardService;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::report_cards::{
    entities::ReportCard,
    requests::{CreateReportCardRequest, ReportCardListQuery, UpdateReportCardRequest},
    responses::ReportCardView,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activity_scores::list::build_score_views;
use crate::services::{current_student, current_teacher, respond};
use crate::storage::Storage;

/// 给成绩单补上科目/班级名称和成绩明细
async fn build_report_card_views(
    storage: &Arc<dyn Storage>,
    report_cards: Vec<ReportCard>,
) -> Result<Vec<ReportCardView>> {
    let mut subject_names: HashMap<i64, String> = HashMap::new();
    let mut class_names: HashMap<i64, String> = HashMap::new();

    let mut views = Vec::with_capacity(report_cards.len());
    for report_card in report_cards {
        if !subject_names.contains_key(&report_card.subject_id)
            && let Some(subject) = storage.get_subject_by_id(report_card.subject_id).await?
        {
            subject_names.insert(report_card.subject_id, subject.name);
        }
        if !class_names.contains_key(&report_card.class_id)
            && let Some(class) = storage.get_class_by_id(report_card.class_id).await?
        {
            class_names.insert(report_card.class_id, class.name);
        }

        let scores = storage
            .scores_for_report(
                report_card.student_id,
                report_card.subject_id,
                report_card.class_id,
                &report_card.period,
            )
            .await?;
        let score_views = build_score_views(storage, scores).await?;

        let subject_name = subject_names
            .get(&report_card.subject_id)
            .cloned()
            .unwrap_or_default();
        let class_name = class_names
            .get(&report_card.class_id)
            .cloned()
            .unwrap_or_default();

        views.push(ReportCardView {
            report_card,
            subject_name,
            class_name,
            scores: score_views,
        });
    }

    Ok(views)
}

pub async fn create_report_card(
    service: &ReportCardService,
    request: &HttpRequest,
    report_data: CreateReportCardRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher_id = match RequireJWT::extract_user_role(request) {
        Some(UserRole::Teacher) => match current_teacher(&storage, request).await {
            Ok(teacher) => teacher.id,
            Err(response) => return Ok(response),
        },
        _ => match report_data.teacher_id {
            Some(teacher_id) => teacher_id,
            None => {
                return Ok(respond::bad_request(
                    ErrorCode::BadRequest,
                    "teacher_id is required when creating as admin",
                ));
            }
        },
    };

    // 组合唯一：同学生同科目同班级同学期
    match storage
        .find_report_card(
            report_data.student_id,
            report_data.subject_id,
            report_data.class_id,
            &report_data.period,
        )
        .await
    {
        Ok(Some(_)) => {
            return Ok(respond::conflict(
                ErrorCode::ReportCardAlreadyExists,
                "A report card already exists for this student/subject/class/period",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(respond::internal("Failed to check report card", e)),
    }

    match storage
        .create_report_card(
            report_data.student_id,
            teacher_id,
            report_data.subject_id,
            report_data.class_id,
            &report_data.period,
        )
        .await
    {
        Ok(report_card) => {
            info!("Report card {} created", report_card.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                report_card,
                "Report card created successfully",
            )))
        }
        Err(e) => Ok(respond::internal("Failed to create report card", e)),
    }
}

pub async fn list_report_cards(
    service: &ReportCardService,
    request: &HttpRequest,
    query: ReportCardListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 教师看自己的，学生看自己的，管理员看全部
    let (teacher_filter, student_filter) = match RequireJWT::extract_user_role(request) {
        Some(UserRole::Teacher) => {
            let teacher = match current_teacher(&storage, request).await {
                Ok(teacher) => teacher,
                Err(response) => return Ok(response),
            };
            (Some(teacher.id), None)
        }
        Some(UserRole::Student) => {
            let student = match current_student(&storage, request).await {
                Ok(student) => student,
                Err(response) => return Ok(response),
            };
            (None, Some(student.id))
        }
        _ => (None, None),
    };

    let report_cards = match storage
        .list_report_cards(teacher_filter, student_filter, &query)
        .await
    {
        Ok(report_cards) => report_cards,
        Err(e) => return Ok(respond::internal("Failed to list report cards", e)),
    };

    match build_report_card_views(&storage, report_cards).await {
        Ok(views) => Ok(respond::ok(views, "Report cards retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build report card views", e)),
    }
}

pub async fn my_report_cards(
    service: &ReportCardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let report_cards = match storage
        .list_report_cards(None, Some(student.id), &ReportCardListQuery::default())
        .await
    {
        Ok(report_cards) => report_cards,
        Err(e) => return Ok(respond::internal("Failed to list report cards", e)),
    };

    match build_report_card_views(&storage, report_cards).await {
        Ok(views) => Ok(respond::ok(views, "Report cards retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build report card views", e)),
    }
}

pub async fn get_report_card(
    service: &ReportCardService,
    request: &HttpRequest,
    report_card_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let report_card = match storage.get_report_card_by_id(report_card_id).await {
        Ok(Some(report_card)) => report_card,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ReportCardNotFound,
                "Report card not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get report card", e)),
    };

    match build_report_card_views(&storage, vec![report_card]).await {
        Ok(mut views) => Ok(respond::ok(
            views.remove(0),
            "Report card retrieved successfully",
        )),
        Err(e) => Ok(respond::internal("Failed to build report card view", e)),
    }
}

pub async fn update_report_card(
    service: &ReportCardService,
    request: &HttpRequest,
    report_card_id: i64,
    update_data: UpdateReportCardRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let report_card = match storage.get_report_card_by_id(report_card_id).await {
        Ok(Some(report_card)) => report_card,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ReportCardNotFound,
                "Report card not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get report card", e)),
    };

    // 教师只能改自己的成绩单
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        if report_card.teacher_id != teacher.id {
            return Ok(respond::forbidden(
                ErrorCode::Forbidden,
                "You do not have permission to edit this report card",
            ));
        }
    }

    let updated = match storage
        .update_report_card(report_card_id, &update_data)
        .await
    {
        Ok(Some(report_card)) => report_card,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ReportCardNotFound,
                "Report card not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to update report card", e)),
    };

    // 更新后重算均分（学期变更会改变关联的成绩集合）
    let scores = match storage
        .scores_for_report(
            updated.student_id,
            updated.subject_id,
            updated.class_id,
            &updated.period,
        )
        .await
    {
        Ok(scores) => scores,
        Err(e) => return Ok(respond::internal("Failed to load scores", e)),
    };
    let mut sum = 0.0;
    let mut count = 0usize;
    for score in &scores {
        let Ok(Some(activity)) = storage.get_activity_by_id(score.activity_id).await else {
            continue;
        };
        if score.countable(activity.kind) {
            sum += score.value.unwrap_or(0.0);
            count += 1;
        }
    }
    let average = if count > 0 { sum / count as f64 } else { 0.0 };
    if let Err(e) = storage.set_final_average(updated.id, average).await {
        return Ok(respond::internal("Failed to save final average", e));
    }

    match build_report_card_views(&storage, vec![updated]).await {
        Ok(mut views) => Ok(respond::ok(
            views.remove(0),
            "Report card updated successfully",
        )),
        Err(e) => Ok(respond::internal("Failed to build report card view", e)),
    }
}

pub async fn delete_report_card(
    service: &ReportCardService,
    request: &HttpRequest,
    report_card_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_report_card(report_card_id).await {
        Ok(true) => {
            info!("Report card {} deleted", report_card_id);
            Ok(respond::ok_empty("Report card deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(
            ErrorCode::ReportCardNotFound,
            "Report card not found",
        )),
        Err(e) => Ok(respond::internal("Failed to delete report card", e)),
    }
}
