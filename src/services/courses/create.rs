use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use super::form::{FormError, course_folder, parse_course_form};
use crate::media::MediaHost;
use crate::models::courses::entities::{LessonKind, MediaAssetRef};
use crate::models::courses::requests::NewCourse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher, respond};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match current_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(response) => return Ok(response),
    };
    let teacher_user = match storage.get_user_by_id(teacher.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(respond::not_found(ErrorCode::UserNotFound, "User not found"));
        }
        Err(e) => return Ok(respond::internal("Failed to get teacher user", e)),
    };

    let mut data = match parse_course_form(payload).await {
        Ok(data) => data,
        Err(FormError::Invalid(message)) => {
            return Ok(respond::bad_request(ErrorCode::BadRequest, message));
        }
        Err(FormError::FileTooLarge(field)) => {
            return Ok(respond::bad_request(
                ErrorCode::FileSizeExceeded,
                format!("File '{field}' exceeds the size limit"),
            ));
        }
        Err(FormError::BadFileType(field)) => {
            return Ok(respond::bad_request(
                ErrorCode::FileTypeNotAllowed,
                format!("File '{field}' has an unsupported format"),
            ));
        }
    };

    if data.form.title.trim().is_empty() {
        return Ok(respond::bad_request(ErrorCode::BadRequest, "Title is required"));
    }
    let Some(subject_id) = data.form.subject_id else {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "Subject is required",
        ));
    };
    if data.form.chapters.is_empty() {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "At least one chapter is required",
        ));
    }

    let folder = course_folder(&teacher_user.name, teacher.id, &data.form.title);
    let media = MediaHost::get();

    // 封面：1200x675 limit 裁切
    let cover = match data.cover.take() {
        Some(bytes) => {
            match media
                .upload_image(
                    bytes,
                    &format!("{folder}/cover"),
                    crate::media::ImageOptions {
                        width: Some(1200),
                        height: Some(675),
                        crop: Some("limit".to_string()),
                        public_id: None,
                    },
                )
                .await
            {
                Ok(asset) => Some(MediaAssetRef {
                    url: asset.url,
                    public_id: asset.public_id,
                }),
                Err(e) => return Ok(respond::internal("Failed to upload course cover", e)),
            }
        }
        None => None,
    };

    // 逐课时处理：视频上传到媒体托管，文本课时校验正文
    let mut chapters = data.form.chapters.clone();
    for (chapter_idx, chapter) in chapters.iter_mut().enumerate() {
        if chapter.title.trim().is_empty() {
            return Ok(respond::bad_request(
                ErrorCode::InvalidChapter,
                format!("Chapter {} is invalid", chapter_idx + 1),
            ));
        }
        for (lesson_idx, lesson) in chapter.lessons.iter_mut().enumerate() {
            if lesson.title.trim().is_empty() {
                return Ok(respond::bad_request(
                    ErrorCode::InvalidChapter,
                    format!(
                        "Lesson {} of chapter {} is invalid",
                        lesson_idx + 1,
                        chapter_idx + 1
                    ),
                ));
            }

            match lesson.kind {
                LessonKind::Video => {
                    if let Some(bytes) = data.videos.remove(&(chapter_idx, lesson_idx)) {
                        let public_id =
                            format!("chapter_{}_lesson_{}", chapter_idx + 1, lesson_idx + 1);
                        match media
                            .upload_video(bytes, &format!("{folder}/videos"), &public_id)
                            .await
                        {
                            Ok(asset) => {
                                lesson.content = asset.url;
                                let minutes =
                                    (asset.duration.unwrap_or(0.0) / 60.0).ceil() as i32;
                                lesson.duration_minutes = minutes.max(1);
                            }
                            Err(e) => {
                                return Ok(respond::internal("Failed to upload lesson video", e));
                            }
                        }
                    } else if lesson.content.trim().is_empty() {
                        // 没有文件也没有已有 URL 的视频课时保留为空，前端可以后补
                        lesson.duration_minutes = lesson.duration_minutes.max(1);
                    }
                }
                LessonKind::Text => {
                    if lesson.content.trim().is_empty() {
                        return Ok(respond::bad_request(
                            ErrorCode::InvalidChapter,
                            format!(
                                "Content of lesson {} of chapter {} is required",
                                lesson_idx + 1,
                                chapter_idx + 1
                            ),
                        ));
                    }
                    lesson.duration_minutes = 1;
                }
            }
        }
    }

    let course = match storage
        .create_course(NewCourse {
            title: data.form.title.trim().to_string(),
            description: data.form.description.clone(),
            subject_id,
            teacher_id: teacher.id,
            cover,
            chapters,
        })
        .await
    {
        Ok(course) => course,
        Err(e) => return Ok(respond::internal("Failed to create course", e)),
    };

    if let Err(e) = storage
        .set_course_classes(course.id, &data.form.allowed_class_ids)
        .await
    {
        return Ok(respond::internal("Failed to link allowed classes", e));
    }

    info!("Course {} created by teacher {}", course.id, teacher.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created successfully")))
}
