use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::middlewares::RequireJWT;
use crate::models::activities::requests::UpdateActivityRequest;
use crate::models::users::entities::UserRole;
use crate::models::ErrorCode;
use crate::services::{current_teacher, respond};
use crate::utils::time::validate_hhmm;

pub async fn update_activity(
    service: &ActivityService,
    request: &HttpRequest,
    activity_id: i64,
    update_data: UpdateActivityRequest,
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

    // 教师只能改自己的活动
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        if activity.teacher_id != teacher.id {
            return Ok(respond::forbidden(
                ErrorCode::Forbidden,
                "You do not have permission to edit this activity",
            ));
        }
    }

    if let Some(start_time) = &update_data.start_time
        && let Err(e) = validate_hhmm(start_time)
    {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }
    if let Some(end_time) = &update_data.end_time
        && let Err(e) = validate_hhmm(end_time)
    {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }

    match storage.update_activity(activity_id, &update_data).await {
        Ok(Some(activity)) => Ok(respond::ok(activity, "Activity updated successfully")),
        Ok(None) => Ok(respond::not_found(
            ErrorCode::ActivityNotFound,
            "Activity not found",
        )),
        Err(e) => Ok(respond::internal("Failed to update activity", e)),
    }
}
