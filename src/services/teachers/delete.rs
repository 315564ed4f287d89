use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::TeacherService;
use crate::media::{MediaHost, extract_public_id_from_url};
use crate::models::ErrorCode;
use crate::models::courses::entities::LessonKind;
use crate::services::respond;

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get teacher", e)),
    };

    let user = match storage.get_user_by_id(teacher.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get user", e)),
    };

    // 头像清理失败不阻塞删除
    if let Some(photo) = &user.photo
        && let Err(e) = MediaHost::get().delete_image(&photo.public_id).await
    {
        warn!("Failed to delete avatar {}: {}", photo.public_id, e);
    }

    // 逐个删除教师的课程：进度、媒体资源、课程行
    let courses = match storage.courses_of_teacher(teacher.id).await {
        Ok(courses) => courses,
        Err(e) => return Ok(respond::internal("Failed to list teacher courses", e)),
    };
    for course in courses {
        let media = MediaHost::get();
        if let Some(cover) = &course.cover
            && let Err(e) = media.delete_image(&cover.public_id).await
        {
            warn!("Failed to delete course cover {}: {}", cover.public_id, e);
        }
        for chapter in &course.chapters {
            for lesson in &chapter.lessons {
                if lesson.kind == LessonKind::Video
                    && let Some(public_id) = extract_public_id_from_url(&lesson.content)
                    && let Err(e) = media.delete_video(&public_id).await
                {
                    warn!("Failed to delete lesson video {}: {}", public_id, e);
                }
            }
        }

        if let Err(e) = storage.delete_progress_of_course(course.id).await {
            warn!("Failed to delete progress of course {}: {}", course.id, e);
        }
        if let Err(e) = storage.delete_course(course.id).await {
            warn!("Failed to delete course {}: {}", course.id, e);
        } else {
            info!("Course {} deleted with its teacher", course.id);
        }
    }

    if let Err(e) = storage.delete_teacher(teacher.id).await {
        return Ok(respond::internal("Failed to delete teacher", e));
    }
    if let Err(e) = storage.delete_user(user.id).await {
        return Ok(respond::internal("Failed to delete user", e));
    }

    info!("Teacher {} ({}) deleted", teacher_id, user.email);
    Ok(respond::ok_empty("Teacher deleted successfully"))
}
