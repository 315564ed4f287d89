use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school_year, respond};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if class_data.name.trim().is_empty() {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "Name, shift and education level are required",
        ));
    }

    let school_year = class_data.school_year.unwrap_or_else(current_school_year);

    // 同名同学年同阶段查重
    match storage
        .find_class_duplicate(
            class_data.name.trim(),
            school_year,
            class_data.education_level,
        )
        .await
    {
        Ok(Some(_)) => {
            return Ok(respond::bad_request(
                ErrorCode::ClassAlreadyExists,
                format!(
                    "Class {} of {school_year}/{} already exists",
                    class_data.name.trim(),
                    class_data.education_level.display_name()
                ),
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(respond::internal("Failed to check class duplicate", e)),
    }

    // 一个学生在同一学年只能属于一个班级
    for student_id in &class_data.student_ids {
        match storage
            .class_of_student_in_year(*student_id, school_year)
            .await
        {
            Ok(Some(_)) => {
                let student_name = match storage.get_student_by_id(*student_id).await {
                    Ok(Some(student)) => storage
                        .get_user_by_id(student.user_id)
                        .await
                        .ok()
                        .flatten()
                        .map(|u| u.name)
                        .unwrap_or_else(|| "Student".to_string()),
                    _ => "Student".to_string(),
                };
                return Ok(respond::bad_request(
                    ErrorCode::StudentAlreadyEnrolled,
                    format!(
                        "{student_name} is already enrolled in a class of the {school_year} school year"
                    ),
                ));
            }
            Ok(None) => {}
            Err(e) => return Ok(respond::internal("Failed to check student enrollment", e)),
        }
    }

    let class = match storage
        .create_class(
            class_data.name.trim(),
            school_year,
            class_data.shift,
            class_data.education_level,
        )
        .await
    {
        Ok(class) => class,
        Err(e) => return Ok(respond::internal("Failed to create class", e)),
    };

    if let Err(e) = storage
        .set_class_students(class.id, &class_data.student_ids)
        .await
    {
        return Ok(respond::internal("Failed to link class students", e));
    }
    if let Err(e) = storage
        .set_class_teachers(class.id, &class_data.teacher_ids)
        .await
    {
        return Ok(respond::internal("Failed to link class teachers", e));
    }
    if let Err(e) = storage
        .set_class_subjects(class.id, &class_data.subject_ids)
        .await
    {
        return Ok(respond::internal("Failed to link class subjects", e));
    }

    info!("Class {} ({}) created", class.name, class.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
}
