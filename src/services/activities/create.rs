use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;
use tracing::info;

use super::ActivityService;
use crate::middlewares::RequireJWT;
use crate::models::activities::requests::CreateActivityRequest;
use crate::models::activities::responses::ActivityCreatedResponse;
use crate::models::activity_scores::entities::ScoreStatus;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_school_year, current_teacher, respond};
use crate::utils::time::{intervals_overlap, validate_hhmm};

pub async fn create_activity(
    service: &ActivityService,
    request: &HttpRequest,
    activity_data: CreateActivityRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if activity_data.name.trim().is_empty() {
        return Ok(respond::bad_request(ErrorCode::BadRequest, "Name is required"));
    }
    if let Err(e) = validate_hhmm(&activity_data.start_time) {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }
    if let Err(e) = validate_hhmm(&activity_data.end_time) {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }

    // 教师建在自己名下；管理员必须指定教师
    let teacher = match RequireJWT::extract_user_role(request) {
        Some(UserRole::Teacher) => match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        },
        Some(UserRole::Admin) => {
            let teacher_id = match activity_data.teacher_id {
                Some(teacher_id) => teacher_id,
                None => {
                    return Ok(respond::bad_request(
                        ErrorCode::BadRequest,
                        "teacher_id is required when creating as admin",
                    ));
                }
            };
            match storage.get_teacher_by_id(teacher_id).await {
                Ok(Some(teacher)) => teacher,
                Ok(None) => {
                    return Ok(respond::not_found(
                        ErrorCode::TeacherNotFound,
                        "Teacher not found",
                    ));
                }
                Err(e) => return Ok(respond::internal("Failed to get teacher", e)),
            }
        }
        _ => {
            return Ok(respond::forbidden(
                ErrorCode::Forbidden,
                "Only teachers can create activities",
            ));
        }
    };

    let class = match storage.get_class_by_id(activity_data.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::ClassNotFound,
                "Class not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get class", e)),
    };

    // 同槽位同学期同班级同科目只能有一个 active 活动
    match storage.find_active_slot_duplicate(&activity_data).await {
        Ok(Some(_)) => {
            return Ok(respond::bad_request(
                ErrorCode::ActivitySlotTaken,
                format!(
                    "An activity {} already exists for this class and subject in semester {}",
                    activity_data.slot, activity_data.semester
                ),
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(respond::internal("Failed to check slot duplicate", e)),
    }

    // 班级名单；旧数据回退到学生行上的 class_id
    let mut roster = match storage.student_ids_of_class(class.id).await {
        Ok(ids) => ids,
        Err(e) => return Ok(respond::internal("Failed to load class roster", e)),
    };
    if roster.is_empty() {
        match storage.list_students(None).await {
            Ok(students) => {
                roster = students
                    .into_iter()
                    .filter(|s| s.class_id == Some(class.id))
                    .map(|s| s.id)
                    .collect();
            }
            Err(e) => return Ok(respond::internal("Failed to load students", e)),
        }
    }
    if roster.is_empty() {
        return Ok(respond::bad_request(
            ErrorCode::EmptyClassRoster,
            "The class has no enrolled students. Add students before creating activities.",
        ));
    }

    let activity = match storage.create_activity(&activity_data, teacher.id).await {
        Ok(activity) => activity,
        Err(e) => return Ok(respond::internal("Failed to create activity", e)),
    };

    let period = activity_data.semester.period_for(current_school_year());

    // 活动时间是否与本班该科目的某个每周课时重叠
    let weekday = activity.date.weekday().num_days_from_sunday() as i32;
    let overlapping_lesson = match storage.active_lessons_of_class(class.id).await {
        Ok(lessons) => lessons.into_iter().find(|l| {
            l.subject_id == activity.subject_id
                && l.weekday == weekday
                && intervals_overlap(
                    &l.start_time,
                    &l.end_time,
                    &activity.start_time,
                    &activity.end_time,
                )
        }),
        Err(e) => return Ok(respond::internal("Failed to load weekly lessons", e)),
    };

    // 为每个学生开一行成绩；已记缺勤的学生直接记零分
    let mut scores_created = 0usize;
    for student_id in roster {
        // 成绩单不存在时先建
        match storage
            .find_report_card(student_id, activity.subject_id, activity.class_id, &period)
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(e) = storage
                    .create_report_card(
                        student_id,
                        teacher.id,
                        activity.subject_id,
                        activity.class_id,
                        &period,
                    )
                    .await
                {
                    tracing::warn!("Failed to create report card for {}: {}", student_id, e);
                }
            }
            Err(e) => return Ok(respond::internal("Failed to find report card", e)),
        }

        let (value, status) = if overlapping_lesson.is_some() {
            match storage
                .find_attendance_on(student_id, activity.class_id, activity.subject_id, activity.date)
                .await
            {
                Ok(Some(attendance)) if !attendance.present => {
                    (Some(0.0), ScoreStatus::absent_for(activity.kind))
                }
                Ok(_) => (None, ScoreStatus::Pending),
                Err(e) => return Ok(respond::internal("Failed to check attendance", e)),
            }
        } else {
            (None, ScoreStatus::Pending)
        };

        match storage
            .create_score(&activity, student_id, &period, value, status)
            .await
        {
            Ok(_) => scores_created += 1,
            Err(e) => tracing::warn!("Failed to create score for {}: {}", student_id, e),
        }
    }

    info!(
        "Activity {} created, {} scores created for the roster",
        activity.id, scores_created
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        ActivityCreatedResponse {
            activity,
            scores_created,
        },
        format!("Activity created and {scores_created} scores created"),
    )))
}
