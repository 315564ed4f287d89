use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::ActivityService;
use crate::middlewares::RequireJWT;
use crate::models::activities::{
    entities::Activity,
    requests::ActivityListQuery,
    responses::ActivityView,
};
use crate::models::users::entities::UserRole;
use crate::models::ErrorCode;
use crate::services::{current_school_year, current_student, current_teacher, respond};
use crate::storage::Storage;

/// 给活动补上科目/班级名称
pub(crate) async fn build_activity_views(
    storage: &Arc<dyn Storage>,
    activities: Vec<Activity>,
) -> crate::errors::Result<Vec<ActivityView>> {
    let mut subject_names: HashMap<i64, String> = HashMap::new();
    let mut class_names: HashMap<i64, String> = HashMap::new();

    let mut views = Vec::with_capacity(activities.len());
    for activity in activities {
        if !subject_names.contains_key(&activity.subject_id)
            && let Some(subject) = storage.get_subject_by_id(activity.subject_id).await?
        {
            subject_names.insert(activity.subject_id, subject.name);
        }
        if !class_names.contains_key(&activity.class_id)
            && let Some(class) = storage.get_class_by_id(activity.class_id).await?
        {
            class_names.insert(activity.class_id, class.name);
        }

        let subject_name = subject_names
            .get(&activity.subject_id)
            .cloned()
            .unwrap_or_default();
        let class_name = class_names
            .get(&activity.class_id)
            .cloned()
            .unwrap_or_default();

        views.push(ActivityView {
            activity,
            subject_name,
            class_name,
        });
    }

    Ok(views)
}

pub async fn list_activities(
    service: &ActivityService,
    request: &HttpRequest,
    query: ActivityListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 教师看自己的活动，学生看自己当前班级的活动，管理员看全部
    let (teacher_filter, class_filter) = match RequireJWT::extract_user_role(request) {
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
            let class_id = match storage
                .active_class_of_student(student.id, current_school_year())
                .await
            {
                Ok(Some(class)) => Some(class.id),
                Ok(None) => student.class_id,
                Err(e) => return Ok(respond::internal("Failed to resolve class", e)),
            };
            match class_id {
                Some(class_id) => (None, Some(class_id)),
                // 没有班级就没有可见的活动
                None => return Ok(respond::ok(Vec::<ActivityView>::new(), "Activities retrieved")),
            }
        }
        _ => (None, None),
    };

    let activities = match storage
        .list_activities(teacher_filter, class_filter, &query)
        .await
    {
        Ok(activities) => activities,
        Err(e) => return Ok(respond::internal("Failed to list activities", e)),
    };

    match build_activity_views(&storage, activities).await {
        Ok(views) => Ok(respond::ok(views, "Activities retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build activity views", e)),
    }
}

pub async fn get_activity(
    service: &ActivityService,
    request: &HttpRequest,
    activity_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let activity = match storage.get_activity_by_id(activity_id).await {
        Ok(Some(activity)) => activity,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ActivityNotFound,
                "Activity not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get activity", e)),
    };

    match build_activity_views(&storage, vec![activity]).await {
        Ok(mut views) => Ok(respond::ok(
            views.remove(0),
            "Activity retrieved successfully",
        )),
        Err(e) => Ok(respond::internal("Failed to build activity view", e)),
    }
}
