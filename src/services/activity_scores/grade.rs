use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use super::ActivityScoreService;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::ActivityKind;
use crate::models::activity_scores::entities::{ActivityScore, ScoreStatus};
use crate::models::activity_scores::requests::{
    SetDeliveryRequest, SetPresenceRequest, SetScoreRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::ErrorCode;
use crate::services::{current_teacher, respond};
use crate::storage::Storage;

/// 重算该成绩所属成绩单的最终均分
///
/// 只计入"可计"的成绩：考试到场 / 作业已交，且有分数。没有可计成绩时均分归零。
pub(crate) async fn recalculate_report_average(
    storage: &Arc<dyn Storage>,
    score: &ActivityScore,
) -> Result<()> {
    let report_card = match storage
        .find_report_card(
            score.student_id,
            score.subject_id,
            score.class_id,
            &score.period,
        )
        .await?
    {
        Some(report_card) => report_card,
        None => return Ok(()),
    };

    let scores = storage
        .scores_for_report(
            score.student_id,
            score.subject_id,
            score.class_id,
            &score.period,
        )
        .await?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for entry in &scores {
        let Some(activity) = storage.get_activity_by_id(entry.activity_id).await? else {
            continue;
        };
        if entry.countable(activity.kind) {
            sum += entry.value.unwrap_or(0.0);
            count += 1;
        }
    }

    let average = if count > 0 { sum / count as f64 } else { 0.0 };
    storage.set_final_average(report_card.id, average).await?;
    Ok(())
}

/// 教师只能改自己的成绩；管理员不受限
async fn check_score_permission(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    score: &ActivityScore,
) -> std::result::Result<(), HttpResponse> {
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = current_teacher(storage, request).await?;
        if score.teacher_id != teacher.id {
            return Err(respond::forbidden(
                ErrorCode::Forbidden,
                "You do not have permission to edit this score",
            ));
        }
    }
    Ok(())
}

pub async fn set_score(
    service: &ActivityScoreService,
    request: &HttpRequest,
    score_id: i64,
    score_data: SetScoreRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let score = match storage.get_score_by_id(score_id).await {
        Ok(Some(score)) => score,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get score", e)),
    };

    if let Err(response) = check_score_permission(&storage, request, &score).await {
        return Ok(response);
    }

    // 分数范围 0-10，null 表示清空
    if let Some(value) = score_data.value
        && !(0.0..=10.0).contains(&value)
    {
        return Ok(respond::bad_request(
            ErrorCode::InvalidScore,
            "Score must be a number between 0 and 10",
        ));
    }

    // 有分数时状态跟着活动类型走
    let status = match score_data.value {
        Some(_) => match storage.get_activity_by_id(score.activity_id).await {
            Ok(Some(activity)) => Some(ScoreStatus::graded_for(activity.kind)),
            Ok(None) => None,
            Err(e) => return Ok(respond::internal("Failed to get activity", e)),
        },
        None => None,
    };

    let updated = match storage
        .update_score(score_id, Some(score_data.value), status)
        .await
    {
        Ok(Some(score)) => score,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to update score", e)),
    };

    // 均分重算失败不影响打分本身
    if let Err(e) = recalculate_report_average(&storage, &updated).await {
        warn!("Failed to recalculate report average: {}", e);
    }

    Ok(respond::ok(updated, "Score saved successfully"))
}

pub async fn set_presence(
    service: &ActivityScoreService,
    request: &HttpRequest,
    score_id: i64,
    presence_data: SetPresenceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if !matches!(
        presence_data.status,
        ScoreStatus::Present | ScoreStatus::Missed
    ) {
        return Ok(respond::bad_request(
            ErrorCode::InvalidScoreStatus,
            "Status must be 'present' or 'missed'",
        ));
    }

    let score = match storage.get_score_by_id(score_id).await {
        Ok(Some(score)) => score,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get score", e)),
    };

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
    if activity.kind != ActivityKind::Exam {
        return Ok(respond::bad_request(
            ErrorCode::InvalidScoreStatus,
            "Presence marking is only for exams",
        ));
    }

    if let Err(response) = check_score_permission(&storage, request, &score).await {
        return Ok(response);
    }

    // 缺考时清掉分数
    let value = if presence_data.status == ScoreStatus::Missed {
        Some(None)
    } else {
        None
    };

    match storage
        .update_score(score_id, value, Some(presence_data.status))
        .await
    {
        Ok(Some(score)) => Ok(respond::ok(score, "Presence saved successfully")),
        Ok(None) => Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found")),
        Err(e) => Ok(respond::internal("Failed to update score", e)),
    }
}

pub async fn set_delivery(
    service: &ActivityScoreService,
    request: &HttpRequest,
    score_id: i64,
    delivery_data: SetDeliveryRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let score = match storage.get_score_by_id(score_id).await {
        Ok(Some(score)) => score,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get score", e)),
    };

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
    if activity.kind != ActivityKind::Assignment {
        return Ok(respond::bad_request(
            ErrorCode::InvalidScoreStatus,
            "Delivery marking is only for assignments",
        ));
    }

    if let Err(response) = check_score_permission(&storage, request, &score).await {
        return Ok(response);
    }

    let status = if delivery_data.delivered {
        ScoreStatus::Delivered
    } else {
        ScoreStatus::NotDelivered
    };
    // 未交时清掉分数
    let value = if delivery_data.delivered {
        None
    } else {
        Some(None)
    };

    match storage.update_score(score_id, value, Some(status)).await {
        Ok(Some(score)) => Ok(respond::ok(score, "Delivery saved successfully")),
        Ok(None) => Ok(respond::not_found(ErrorCode::ScoreNotFound, "Score not found")),
        Err(e) => Ok(respond::internal("Failed to update score", e)),
    }
}
