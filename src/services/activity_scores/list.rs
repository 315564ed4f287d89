use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::ActivityScoreService;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::activity_scores::{
    entities::ActivityScore,
    requests::ScoreListQuery,
    responses::{ScoreActivitySummary, ScoreView},
};
use crate::models::activities::requests::ActivityListQuery;
use crate::models::users::entities::UserRole;
use crate::models::ErrorCode;
use crate::services::{current_student, current_teacher, respond};
use crate::storage::Storage;

/// 给成绩补上活动摘要与科目/学生名称
pub(crate) async fn build_score_views(
    storage: &Arc<dyn Storage>,
    scores: Vec<ActivityScore>,
) -> Result<Vec<ScoreView>> {
    let mut activities: HashMap<i64, ScoreActivitySummary> = HashMap::new();
    let mut subject_names: HashMap<i64, String> = HashMap::new();
    let mut student_names: HashMap<i64, String> = HashMap::new();

    let mut views = Vec::with_capacity(scores.len());
    for score in scores {
        if !activities.contains_key(&score.activity_id)
            && let Some(activity) = storage.get_activity_by_id(score.activity_id).await?
        {
            activities.insert(
                score.activity_id,
                ScoreActivitySummary {
                    id: activity.id,
                    name: activity.name,
                    kind: activity.kind,
                    slot: activity.slot,
                    date: activity.date,
                    start_time: activity.start_time,
                    end_time: activity.end_time,
                },
            );
        }
        if !subject_names.contains_key(&score.subject_id)
            && let Some(subject) = storage.get_subject_by_id(score.subject_id).await?
        {
            subject_names.insert(score.subject_id, subject.name);
        }
        if !student_names.contains_key(&score.student_id)
            && let Some(student) = storage.get_student_by_id(score.student_id).await?
            && let Some(user) = storage.get_user_by_id(student.user_id).await?
        {
            student_names.insert(score.student_id, user.name);
        }

        let activity = activities.get(&score.activity_id).cloned();
        let subject_name = subject_names
            .get(&score.subject_id)
            .cloned()
            .unwrap_or_default();
        let student_name = student_names
            .get(&score.student_id)
            .cloned()
            .unwrap_or_default();

        views.push(ScoreView {
            score,
            activity,
            subject_name,
            student_name,
        });
    }

    Ok(views)
}

pub async fn list_scores(
    service: &ActivityScoreService,
    request: &HttpRequest,
    mut query: ScoreListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 指定了 activity_id 时不再按教师过滤，活动本身已经限定了归属
    let teacher_filter = match RequireJWT::extract_user_role(request) {
        Some(UserRole::Teacher) if query.activity_id.is_none() => {
            let teacher = match current_teacher(&storage, request).await {
                Ok(teacher) => teacher,
                Err(response) => return Ok(response),
            };
            Some(teacher.id)
        }
        Some(UserRole::Student) => {
            let student = match current_student(&storage, request).await {
                Ok(student) => student,
                Err(response) => return Ok(response),
            };
            query.student_id = Some(student.id);
            None
        }
        _ => None,
    };

    // 按活动类型过滤时先取出该类型的活动 ID 集合
    let activity_ids = match query.kind {
        Some(kind) => {
            let activities = match storage
                .list_activities(
                    None,
                    None,
                    &ActivityListQuery {
                        kind: Some(kind),
                        ..Default::default()
                    },
                )
                .await
            {
                Ok(activities) => activities,
                Err(e) => return Ok(respond::internal("Failed to list activities", e)),
            };
            Some(activities.into_iter().map(|a| a.id).collect::<Vec<_>>())
        }
        None => None,
    };

    let scores = match storage
        .list_scores(teacher_filter, &query, activity_ids.as_deref())
        .await
    {
        Ok(scores) => scores,
        Err(e) => return Ok(respond::internal("Failed to list scores", e)),
    };

    match build_score_views(&storage, scores).await {
        Ok(views) => Ok(respond::ok(views, "Scores retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build score views", e)),
    }
}

pub async fn get_score(
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

    match build_score_views(&storage, vec![score]).await {
        Ok(mut views) => Ok(respond::ok(views.remove(0), "Score retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build score view", e)),
    }
}
