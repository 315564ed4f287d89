use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ActivityService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::ErrorCode;
use crate::services::{current_teacher, respond};

pub async fn delete_activity(
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

    // 教师只能删自己的活动
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        if activity.teacher_id != teacher.id {
            return Ok(respond::forbidden(
                ErrorCode::Forbidden,
                "You do not have permission to delete this activity",
            ));
        }
    }

    // 先清掉这次活动的全部成绩行，成绩单通过联结自然不再引用它们
    match storage.delete_scores_of_activity(activity_id).await {
        Ok(removed) => {
            info!("Removed {} scores of activity {}", removed, activity_id);
        }
        Err(e) => return Ok(respond::internal("Failed to delete activity scores", e)),
    }

    match storage.delete_activity(activity_id).await {
        Ok(true) => {
            info!("Activity {} deleted", activity_id);
            Ok(respond::ok_empty("Activity deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(
            ErrorCode::ActivityNotFound,
            "Activity not found",
        )),
        Err(e) => Ok(respond::internal("Failed to delete activity", e)),
    }
}
