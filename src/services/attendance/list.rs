use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::AttendanceService;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::attendance::{
    entities::Attendance,
    requests::AttendanceListQuery,
    responses::{AbsencesResponse, AttendanceView},
};
use crate::models::users::entities::UserRole;
use crate::services::{current_student, current_teacher, respond};
use crate::storage::Storage;

/// 给出勤记录补上班级/科目/学生名称
pub(crate) async fn build_attendance_views(
    storage: &Arc<dyn Storage>,
    records: Vec<Attendance>,
) -> Result<Vec<AttendanceView>> {
    let mut class_names: HashMap<i64, String> = HashMap::new();
    let mut subject_names: HashMap<i64, String> = HashMap::new();
    let mut student_names: HashMap<i64, String> = HashMap::new();

    let mut views = Vec::with_capacity(records.len());
    for attendance in records {
        if !class_names.contains_key(&attendance.class_id)
            && let Some(class) = storage.get_class_by_id(attendance.class_id).await?
        {
            class_names.insert(attendance.class_id, class.name);
        }
        if !subject_names.contains_key(&attendance.subject_id)
            && let Some(subject) = storage.get_subject_by_id(attendance.subject_id).await?
        {
            subject_names.insert(attendance.subject_id, subject.name);
        }
        if !student_names.contains_key(&attendance.student_id)
            && let Some(student) = storage.get_student_by_id(attendance.student_id).await?
            && let Some(user) = storage.get_user_by_id(student.user_id).await?
        {
            student_names.insert(attendance.student_id, user.name);
        }

        let class_name = class_names
            .get(&attendance.class_id)
            .cloned()
            .unwrap_or_default();
        let subject_name = subject_names
            .get(&attendance.subject_id)
            .cloned()
            .unwrap_or_default();
        let student_name = student_names
            .get(&attendance.student_id)
            .cloned()
            .unwrap_or_default();

        views.push(AttendanceView {
            attendance,
            class_name,
            subject_name,
            student_name,
        });
    }

    Ok(views)
}

pub async fn list_attendances(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 教师看自己点的名，学生看自己的记录，管理员看全部
    let (teacher_filter, student_filter) = match RequireJWT::extract_user_role(request) {
        Some(UserRole::Teacher) => {
            let teacher = match current_teacher(&storage, request).await {
                Ok(teacher) => teacher,
                Err(response) => return Ok(response),
            };
            (Some(teacher.id), None)
        }
        Some(UserRole::Student) => {
            let student = match current_student(&storage, request).await {
                Ok(student) => student,
                Err(response) => return Ok(response),
            };
            (None, Some(student.id))
        }
        _ => (None, None),
    };

    let records = match storage
        .list_attendances(teacher_filter, student_filter, &query, None)
        .await
    {
        Ok(records) => records,
        Err(e) => return Ok(respond::internal("Failed to list attendances", e)),
    };

    match build_attendance_views(&storage, records).await {
        Ok(views) => Ok(respond::ok(views, "Attendances retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build attendance views", e)),
    }
}

/// 学生的缺勤汇总，按科目名称分组
pub async fn my_absences(
    service: &AttendanceService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let records = match storage
        .list_attendances(
            None,
            Some(student.id),
            &AttendanceListQuery::default(),
            Some(false),
        )
        .await
    {
        Ok(records) => records,
        Err(e) => return Ok(respond::internal("Failed to list absences", e)),
    };

    let views = match build_attendance_views(&storage, records).await {
        Ok(views) => views,
        Err(e) => return Ok(respond::internal("Failed to build attendance views", e)),
    };

    let mut by_subject: BTreeMap<String, Vec<AttendanceView>> = BTreeMap::new();
    for view in &views {
        by_subject
            .entry(view.subject_name.clone())
            .or_default()
            .push(view.clone());
    }

    Ok(respond::ok(
        AbsencesResponse {
            total_absences: views.len(),
            absences_by_subject: by_subject,
            absences: views,
        },
        "Absences retrieved successfully",
    ))
}
