use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::ActivityScoreService;
use super::grade::recalculate_report_average;
use crate::middlewares::RequireJWT;
use crate::models::activity_scores::requests::UpdateScoreRequest;
use crate::models::users::entities::UserRole;
use crate::models::ErrorCode;
use crate::services::{current_teacher, respond};

pub async fn update_score(
    service: &ActivityScoreService,
    request: &HttpRequest,
    score_id: i64,
    update_data: UpdateScoreRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let score = match storage.get_score_by_id(score_id).await {
        Ok(Some(score)) => score,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get score", e)),
    };

    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        if score.teacher_id != teacher.id {
            return Ok(respond::forbidden(
                ErrorCode::Forbidden,
                "You do not have permission to edit this score",
            ));
        }
    }

    // 状态必须和活动类型匹配
    if let Some(status) = update_data.status {
        let activity = match storage.get_activity_by_id(score.activity_id).await {
            Ok(Some(activity)) => activity,
            Ok(None) => {
                return Ok(respond::not_found(
                    ErrorCode::ActivityNotFound,
                    "Activity not found",
                ));
            }
            Err(e) => return Ok(respond::internal("Failed to get activity", e)),
        };
        if !status.valid_for(activity.kind) {
            return Ok(respond::bad_request(
                ErrorCode::InvalidScoreStatus,
                format!("Status '{status}' is not valid for this activity kind"),
            ));
        }
    }

    if let Some(Some(value)) = update_data.value
        && !(0.0..=10.0).contains(&value)
    {
        return Ok(respond::bad_request(
            ErrorCode::InvalidScore,
            "Score must be a number between 0 and 10",
        ));
    }

    let value_changed = update_data.value.is_some();
    let updated = match storage
        .update_score(score_id, update_data.value, update_data.status)
        .await
    {
        Ok(Some(score)) => score,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to update score", e)),
    };

    if value_changed
        && let Err(e) = recalculate_report_average(&storage, &updated).await
    {
        warn!("Failed to recalculate report average: {}", e);
    }

    Ok(respond::ok(updated, "Score updated successfully"))
}

pub async fn delete_score(
    service: &ActivityScoreService,
    request: &HttpRequest,
    score_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let score = match storage.get_score_by_id(score_id).await {
        Ok(Some(score)) => score,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get score", e)),
    };

    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        if score.teacher_id != teacher.id {
            return Ok(respond::forbidden(
                ErrorCode::Forbidden,
                "You do not have permission to delete this score",
            ));
        }
    }

    match storage.delete_score(score_id).await {
        Ok(true) => {
            // 删除后重算所属成绩单的均分
            if let Err(e) = recalculate_report_average(&storage, &score).await {
                warn!("Failed to recalculate report average: {}", e);
            }
            Ok(respond::ok_empty("Score deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found")),
        Err(e) => Ok(respond::internal("Failed to delete score", e)),
    }
}
