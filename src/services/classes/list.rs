use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::requests::ClassListQuery;
use crate::models::classes::responses::ClassListItem;
use crate::services::{current_teacher, respond};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let classes = match storage.list_classes(&query).await {
        Ok(classes) => classes,
        Err(e) => return Ok(respond::internal("Failed to list classes", e)),
    };

    let mut items = Vec::with_capacity(classes.len());
    for class in classes {
        let student_count = match storage.student_ids_of_class(class.id).await {
            Ok(ids) => ids.len(),
            Err(e) => return Ok(respond::internal("Failed to load class roster", e)),
        };
        let teacher_count = match storage.teacher_ids_of_class(class.id).await {
            Ok(ids) => ids.len(),
            Err(e) => return Ok(respond::internal("Failed to load class teachers", e)),
        };
        let subjects = match storage.subject_ids_of_class(class.id).await {
            Ok(ids) => match storage.subjects_by_ids(&ids).await {
                Ok(subjects) => subjects.into_iter().map(|s| s.name).collect(),
                Err(e) => return Ok(respond::internal("Failed to load class subjects", e)),
            },
            Err(e) => return Ok(respond::internal("Failed to load class subjects", e)),
        };

        items.push(ClassListItem {
            class,
            student_count,
            teacher_count,
            subjects,
        });
    }

    Ok(respond::ok(items, "Classes retrieved successfully"))
}

/// 教师自己的班级（仅成员关系，课程表里的班级见教师档案）
pub async fn my_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match current_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        // 没有教师档案时返回空列表
        Err(_) => return Ok(respond::ok(Vec::<ClassListItem>::new(), "Classes retrieved")),
    };

    match storage.classes_of_teacher(teacher.id).await {
        Ok(classes) => Ok(respond::ok(classes, "Classes retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to list teacher classes", e)),
    }
}
