use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::attendance::requests::MarkAttendanceRequest;
use crate::models::attendance::responses::MarkAttendanceResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher, respond};
use crate::utils::time::intervals_overlap;

pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mark_data: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_by_id(mark_data.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ClassNotFound,
                "Class not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get class", e)),
    }

    // 确定记录归属的教师：
    // 教师必须对该班级+科目有 active 课时；管理员从课表解析教师，
    // 找不到课时再退回任一讲授该科目的教师。
    let teacher_id = match RequireJWT::extract_user_role(request) {
        Some(UserRole::Admin) => {
            match storage
                .find_active_lesson(mark_data.class_id, mark_data.subject_id, None)
                .await
            {
                Ok(Some(lesson)) => lesson.teacher_id,
                Ok(None) => match storage.teachers_of_subject(mark_data.subject_id).await {
                    Ok(teachers) => match teachers.first() {
                        Some(teacher) => teacher.id,
                        None => {
                            return Ok(respond::bad_request(
                                ErrorCode::NoTeacherForSubject,
                                "Could not find a teacher for this subject",
                            ));
                        }
                    },
                    Err(e) => return Ok(respond::internal("Failed to load subject teachers", e)),
                },
                Err(e) => return Ok(respond::internal("Failed to load weekly lesson", e)),
            }
        }
        _ => {
            let teacher = match current_teacher(&storage, request).await {
                Ok(teacher) => teacher,
                Err(response) => return Ok(response),
            };
            match storage
                .find_active_lesson(mark_data.class_id, mark_data.subject_id, Some(teacher.id))
                .await
            {
                Ok(Some(_)) => teacher.id,
                Ok(None) => {
                    return Ok(respond::forbidden(
                        ErrorCode::AttendancePermissionDenied,
                        "You do not teach this class/subject",
                    ));
                }
                Err(e) => return Ok(respond::internal("Failed to check weekly lesson", e)),
            }
        }
    };

    let mut records = Vec::with_capacity(mark_data.entries.len());
    for entry in &mark_data.entries {
        // 不存在的学生直接跳过
        match storage.get_student_by_id(entry.student_id).await {
            Ok(Some(_)) => {}
            Ok(None) => continue,
            Err(e) => return Ok(respond::internal("Failed to get student", e)),
        }

        // 同一学生同一天同一科目只保留一条记录
        let record = match storage
            .find_attendance_on(
                entry.student_id,
                mark_data.class_id,
                mark_data.subject_id,
                mark_data.date,
            )
            .await
        {
            Ok(Some(existing)) => {
                match storage
                    .set_attendance_present(existing.id, entry.present)
                    .await
                {
                    Ok(Some(updated)) => updated,
                    Ok(None) => continue,
                    Err(e) => return Ok(respond::internal("Failed to update attendance", e)),
                }
            }
            Ok(None) => {
                match storage
                    .create_attendance(
                        entry.student_id,
                        teacher_id,
                        mark_data.class_id,
                        mark_data.subject_id,
                        mark_data.date,
                        entry.present,
                    )
                    .await
                {
                    Ok(record) => record,
                    Err(e) => return Ok(respond::internal("Failed to create attendance", e)),
                }
            }
            Err(e) => return Ok(respond::internal("Failed to find attendance", e)),
        };

        // 缺勤时：当天与课时时间重叠的活动直接记零分
        if !entry.present {
            if let Err(response) =
                zero_out_overlapping_activities(&storage, &mark_data, entry.student_id).await
            {
                return Ok(response);
            }
        }

        records.push(record);
    }

    info!(
        "Attendance marked for class {} subject {} on {} ({} records)",
        mark_data.class_id,
        mark_data.subject_id,
        mark_data.date,
        records.len()
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        MarkAttendanceResponse { records },
        "Attendance marked successfully",
    )))
}

/// 缺勤学生在当天与课时时间重叠的活动上自动得零分
async fn zero_out_overlapping_activities(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    mark_data: &MarkAttendanceRequest,
    student_id: i64,
) -> Result<(), HttpResponse> {
    let lesson = match storage
        .find_active_lesson(mark_data.class_id, mark_data.subject_id, None)
        .await
    {
        Ok(Some(lesson)) => lesson,
        Ok(None) => return Ok(()),
        Err(e) => return Err(respond::internal("Failed to load weekly lesson", e)),
    };

    let activities = match storage
        .activities_on_date(mark_data.class_id, mark_data.subject_id, mark_data.date)
        .await
    {
        Ok(activities) => activities,
        Err(e) => return Err(respond::internal("Failed to load activities", e)),
    };

    for activity in activities {
        if !intervals_overlap(
            &lesson.start_time,
            &lesson.end_time,
            &activity.start_time,
            &activity.end_time,
        ) {
            continue;
        }

        match storage
            .get_score_by_student_activity(student_id, activity.id)
            .await
        {
            Ok(Some(score)) => {
                let status =
                    crate::models::activity_scores::entities::ScoreStatus::absent_for(activity.kind);
                if let Err(e) = storage
                    .update_score(score.id, Some(Some(0.0)), Some(status))
                    .await
                {
                    warn!("Failed to zero out score {}: {}", score.id, e);
                }
            }
            Ok(None) => {}
            Err(e) => return Err(respond::internal("Failed to load score", e)),
        }
    }

    Ok(())
}
