use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use super::CourseService;
use crate::media::{MediaHost, extract_public_id_from_url};
use crate::middlewares::RequireJWT;
use crate::models::courses::entities::{Course, CourseChapter, CourseStatus, LessonKind};
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::users::entities::UserRole;
use crate::models::ErrorCode;
use crate::services::{current_teacher, respond};
use crate::storage::Storage;

/// 删除被移除的视频课时在媒体托管上的资源（尽力而为）
async fn delete_removed_videos(old_chapters: &[CourseChapter], new_chapters: &[CourseChapter]) {
    let media = MediaHost::get();
    for old_chapter in old_chapters {
        for old_lesson in &old_chapter.lessons {
            if old_lesson.kind != LessonKind::Video || old_lesson.content.is_empty() {
                continue;
            }
            let survives = new_chapters.iter().any(|chapter| {
                chapter.lessons.iter().any(|lesson| {
                    lesson.kind == LessonKind::Video && lesson.content == old_lesson.content
                })
            });
            if !survives
                && let Some(public_id) = extract_public_id_from_url(&old_lesson.content)
                && let Err(e) = media.delete_video(&public_id).await
            {
                warn!("Failed to delete removed video {}: {}", public_id, e);
            }
        }
    }
}

/// 应用停用/启用的锁语义
///
/// 停用会锁上所有章节；管理员上的锁教师解不开。
fn apply_status_change(course: &mut Course, status: CourseStatus, is_admin: bool) -> Result<(), HttpResponse> {
    match status {
        CourseStatus::Inactive => {
            course.status = CourseStatus::Inactive;
            if is_admin {
                course.admin_locked = true;
            }
            for chapter in &mut course.chapters {
                chapter.locked = true;
                if is_admin {
                    chapter.admin_locked = true;
                }
            }
        }
        CourseStatus::Active => {
            if !is_admin && course.admin_locked {
                return Err(respond::forbidden(
                    ErrorCode::LockedByAdmin,
                    "This course was locked by an administrator and cannot be unlocked by a teacher",
                ));
            }
            course.status = CourseStatus::Active;
            course.admin_locked = false;
            for chapter in &mut course.chapters {
                if is_admin || !chapter.admin_locked {
                    chapter.locked = false;
                    chapter.admin_locked = false;
                }
            }
        }
    }
    Ok(())
}

/// 合并新章节列表，保护管理员锁
fn apply_chapters(
    course: &mut Course,
    mut new_chapters: Vec<CourseChapter>,
    is_admin: bool,
) -> Result<(), HttpResponse> {
    for (index, new_chapter) in new_chapters.iter_mut().enumerate() {
        let existing = course.chapters.get(index);

        if new_chapter.locked {
            new_chapter.admin_locked = is_admin;
        } else if let Some(existing) = existing
            && existing.admin_locked
            && !is_admin
        {
            // 教师解不开管理员上的锁
            new_chapter.locked = true;
            new_chapter.admin_locked = true;
        } else {
            new_chapter.admin_locked = false;
        }
    }

    course.chapters = new_chapters;
    Ok(())
}

pub(crate) async fn check_course_ownership(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    course: &Course,
) -> Result<bool, HttpResponse> {
    match RequireJWT::extract_user_role(request) {
        Some(UserRole::Admin) => Ok(true),
        Some(UserRole::Teacher) => {
            let teacher = current_teacher(storage, request).await?;
            if course.teacher_id != teacher.id {
                return Err(respond::forbidden(
                    ErrorCode::Forbidden,
                    "You do not have permission to edit this course",
                ));
            }
            Ok(false)
        }
        _ => Err(respond::forbidden(ErrorCode::Forbidden, "Access denied")),
    }
}

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::CourseNotFound,
                "Course not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get course", e)),
    };

    let is_admin = match check_course_ownership(&storage, request, &course).await {
        Ok(is_admin) => is_admin,
        Err(response) => return Ok(response),
    };

    if let Some(status) = update_data.status
        && let Err(response) = apply_status_change(&mut course, status, is_admin)
    {
        return Ok(response);
    }

    if let Some(new_chapters) = update_data.chapters {
        delete_removed_videos(&course.chapters, &new_chapters).await;
        if let Err(response) = apply_chapters(&mut course, new_chapters, is_admin) {
            return Ok(response);
        }
    }

    if let Some(title) = &update_data.title
        && !title.trim().is_empty()
    {
        course.title = title.trim().to_string();
    }
    if let Some(description) = &update_data.description {
        course.description = Some(description.clone());
    }
    if let Some(subject_id) = update_data.subject_id {
        course.subject_id = subject_id;
    }

    if let Err(e) = storage.save_course(&course).await {
        return Ok(respond::internal("Failed to save course", e));
    }

    if let Some(allowed_class_ids) = &update_data.allowed_class_ids
        && let Err(e) = storage.set_course_classes(course.id, allowed_class_ids).await
    {
        return Ok(respond::internal("Failed to relink allowed classes", e));
    }

    match super::list::build_course_views(&storage, vec![course], None).await {
        Ok(mut views) => Ok(respond::ok(views.remove(0), "Course updated successfully")),
        Err(e) => Ok(respond::internal("Failed to build course view", e)),
    }
}
