use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::entities::CourseStatus;
use crate::models::courses::responses::EnrollmentCheckResponse;
use crate::models::ErrorCode;
use crate::services::{current_school_year, current_student, respond};

pub async fn check_enrollment(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::CourseNotFound,
                "Course not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get course", e)),
    }

    match storage.is_student_enrolled(course_id, student.id).await {
        Ok(enrolled) => Ok(respond::ok(
            EnrollmentCheckResponse { enrolled },
            "Enrollment checked",
        )),
        Err(e) => Ok(respond::internal("Failed to check enrollment", e)),
    }
}

pub async fn enroll(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::CourseNotFound,
                "Course not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get course", e)),
    };

    if course.status != CourseStatus::Active {
        return Ok(respond::bad_request(
            ErrorCode::CourseInactive,
            "Course is not active",
        ));
    }

    match storage.is_student_enrolled(course_id, student.id).await {
        Ok(true) => {
            return Ok(respond::bad_request(
                ErrorCode::AlreadyEnrolled,
                "Student is already enrolled in this course",
            ));
        }
        Ok(false) => {}
        Err(e) => return Ok(respond::internal("Failed to check enrollment", e)),
    }

    // 班级准入：列表为空表示对所有班级开放
    let allowed_class_ids = match storage.class_ids_of_course(course_id).await {
        Ok(ids) => ids,
        Err(e) => return Ok(respond::internal("Failed to load allowed classes", e)),
    };
    if !allowed_class_ids.is_empty() {
        let class_id = match storage
            .active_class_of_student(student.id, current_school_year())
            .await
        {
            Ok(Some(class)) => Some(class.id),
            Ok(None) => student.class_id,
            Err(e) => return Ok(respond::internal("Failed to resolve class", e)),
        };
        if let Some(class_id) = class_id
            && !allowed_class_ids.contains(&class_id)
        {
            return Ok(respond::forbidden(
                ErrorCode::EnrollmentDenied,
                "Your class does not have access to this course",
            ));
        }
    }

    if let Err(e) = storage.enroll_student(course_id, student.id).await {
        return Ok(respond::internal("Failed to enroll", e));
    }

    // 报名即建进度行
    if let Err(e) = storage.create_progress(student.id, course_id).await {
        tracing::warn!("Failed to create progress row: {}", e);
    }

    info!("Student {} enrolled in course {}", student.id, course_id);
    Ok(HttpResponse::Created().json(crate::models::ApiResponse::success_empty(
        "Enrollment completed successfully",
    )))
}
