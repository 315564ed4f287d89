use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use super::profile::build_student_profile;
use crate::models::SortOrder;
use crate::models::students::requests::StudentListQuery;
use crate::services::respond;

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let students = match storage.list_students(query.status).await {
        Ok(students) => students,
        Err(e) => return Ok(respond::internal("Failed to list students", e)),
    };

    // 逐个组装档案（班级解析含本学年回退逻辑）
    let mut profiles = Vec::with_capacity(students.len());
    for student in students {
        match build_student_profile(&storage, student).await {
            Ok(profile) => profiles.push(profile),
            Err(e) => return Ok(respond::internal("Failed to build student profile", e)),
        }
    }

    // 班级过滤基于解析后的当前班级
    if let Some(class_id) = query.class_id {
        profiles.retain(|p| p.class.as_ref().map(|c| c.id) == Some(class_id));
    }

    match query.order.unwrap_or_default() {
        SortOrder::AZ => profiles.sort_by(|a, b| a.user.name.cmp(&b.user.name)),
        SortOrder::ZA => profiles.sort_by(|a, b| b.user.name.cmp(&a.user.name)),
        SortOrder::Recent => {
            profiles.sort_by(|a, b| b.student.created_at.cmp(&a.student.created_at))
        }
        SortOrder::Oldest => {
            profiles.sort_by(|a, b| a.student.created_at.cmp(&b.student.created_at))
        }
    }

    Ok(respond::ok(profiles, "Students retrieved successfully"))
}
