use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use super::profile::build_teacher_profile;
use crate::models::SortOrder;
use crate::models::teachers::requests::TeacherListQuery;
use crate::services::respond;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teachers = match storage.list_teachers(query.status).await {
        Ok(teachers) => teachers,
        Err(e) => return Ok(respond::internal("Failed to list teachers", e)),
    };

    let mut profiles = Vec::with_capacity(teachers.len());
    for teacher in teachers {
        match build_teacher_profile(&storage, teacher).await {
            Ok(profile) => profiles.push(profile),
            Err(e) => return Ok(respond::internal("Failed to build teacher profile", e)),
        }
    }

    if let Some(class_id) = query.class_id {
        profiles.retain(|p| p.classes.iter().any(|c| c.id == class_id));
    }
    if let Some(subject_id) = query.subject_id {
        profiles.retain(|p| p.subjects.iter().any(|s| s.id == subject_id));
    }

    match query.order.unwrap_or_default() {
        SortOrder::AZ => profiles.sort_by(|a, b| a.user.name.cmp(&b.user.name)),
        SortOrder::ZA => profiles.sort_by(|a, b| b.user.name.cmp(&a.user.name)),
        SortOrder::Recent => {
            profiles.sort_by(|a, b| b.teacher.created_at.cmp(&a.teacher.created_at))
        }
        SortOrder::Oldest => {
            profiles.sort_by(|a, b| a.teacher.created_at.cmp(&b.teacher.created_at))
        }
    }

    Ok(respond::ok(profiles, "Teachers retrieved successfully"))
}
