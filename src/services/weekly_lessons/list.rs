use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::WeeklyLessonService;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::weekly_lessons::{
    entities::{WeeklyLesson, weekday_name},
    requests::WeeklyLessonQuery,
    responses::{LessonView, MyLessonsResponse, UpcomingDay, UpcomingLessonsResponse},
};
use crate::services::{current_school_year, current_student, current_teacher, respond};
use crate::storage::Storage;

/// 给课时补上班级/科目/教师名称
pub(crate) async fn build_lesson_views(
    storage: &Arc<dyn Storage>,
    lessons: Vec<WeeklyLesson>,
) -> Result<Vec<LessonView>> {
    let mut class_names: HashMap<i64, String> = HashMap::new();
    let mut subject_names: HashMap<i64, String> = HashMap::new();
    let mut teacher_names: HashMap<i64, String> = HashMap::new();

    let mut views = Vec::with_capacity(lessons.len());
    for lesson in lessons {
        if !class_names.contains_key(&lesson.class_id)
            && let Some(class) = storage.get_class_by_id(lesson.class_id).await?
        {
            class_names.insert(lesson.class_id, class.name);
        }
        if !subject_names.contains_key(&lesson.subject_id)
            && let Some(subject) = storage.get_subject_by_id(lesson.subject_id).await?
        {
            subject_names.insert(lesson.subject_id, subject.name);
        }
        if !teacher_names.contains_key(&lesson.teacher_id)
            && let Some(teacher) = storage.get_teacher_by_id(lesson.teacher_id).await?
            && let Some(user) = storage.get_user_by_id(teacher.user_id).await?
        {
            teacher_names.insert(lesson.teacher_id, user.name);
        }

        let class_name = class_names
            .get(&lesson.class_id)
            .cloned()
            .unwrap_or_default();
        let subject_name = subject_names
            .get(&lesson.subject_id)
            .cloned()
            .unwrap_or_default();
        let teacher_name = teacher_names
            .get(&lesson.teacher_id)
            .cloned()
            .unwrap_or_default();

        views.push(LessonView {
            lesson,
            class_name,
            subject_name,
            teacher_name,
        });
    }

    Ok(views)
}

pub async fn list_lessons(
    service: &WeeklyLessonService,
    request: &HttpRequest,
    query: WeeklyLessonQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 教师看自己的课，学生看自己当前班级的课，管理员看全部
    let (teacher_filter, class_filter) = match RequireJWT::extract_user_role(request) {
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
            let class_id = match storage
                .active_class_of_student(student.id, current_school_year())
                .await
            {
                Ok(Some(class)) => Some(class.id),
                Ok(None) => student.class_id,
                Err(e) => return Ok(respond::internal("Failed to resolve class", e)),
            };
            match class_id {
                Some(class_id) => (None, Some(class_id)),
                None => return Ok(respond::ok(Vec::<LessonView>::new(), "Lessons retrieved")),
            }
        }
        _ => (None, None),
    };

    let lessons = match storage
        .list_weekly_lessons(teacher_filter, class_filter, &query)
        .await
    {
        Ok(lessons) => lessons,
        Err(e) => return Ok(respond::internal("Failed to list weekly lessons", e)),
    };

    match build_lesson_views(&storage, lessons).await {
        Ok(views) => Ok(respond::ok(views, "Lessons retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build lesson views", e)),
    }
}

/// 教师课表：全量 + 按 weekday 0-6 分组
pub async fn my_lessons(
    service: &WeeklyLessonService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match current_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(response) => return Ok(response),
    };

    let lessons = match storage
        .list_weekly_lessons(Some(teacher.id), None, &WeeklyLessonQuery::default())
        .await
    {
        Ok(lessons) => lessons,
        Err(e) => return Ok(respond::internal("Failed to list weekly lessons", e)),
    };

    let views = match build_lesson_views(&storage, lessons).await {
        Ok(views) => views,
        Err(e) => return Ok(respond::internal("Failed to build lesson views", e)),
    };

    // 七天都给出分组，没课的天是空数组
    let mut by_weekday: BTreeMap<i32, Vec<LessonView>> = (0..7).map(|d| (d, Vec::new())).collect();
    for view in &views {
        by_weekday
            .entry(view.lesson.weekday)
            .or_default()
            .push(view.clone());
    }

    Ok(respond::ok(
        MyLessonsResponse {
            lessons: views,
            lessons_by_weekday: by_weekday,
        },
        "Lessons retrieved successfully",
    ))
}

/// 学生的"接下来一周"：从今天开始按 weekday 滚动 7 天
pub async fn upcoming_lessons(
    service: &WeeklyLessonService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let Some(class_id) = student.class_id else {
        return Ok(respond::ok(
            UpcomingLessonsResponse {
                lessons: Vec::new(),
                upcoming: Vec::new(),
            },
            "Lessons retrieved",
        ));
    };

    let lessons = match storage.active_lessons_of_class(class_id).await {
        Ok(lessons) => lessons,
        Err(e) => return Ok(respond::internal("Failed to list weekly lessons", e)),
    };

    let views = match build_lesson_views(&storage, lessons).await {
        Ok(views) => views,
        Err(e) => return Ok(respond::internal("Failed to build lesson views", e)),
    };

    let today = chrono::Local::now().date_naive().weekday().num_days_from_sunday() as i32;
    let mut upcoming = Vec::new();
    for offset in 0..7 {
        let weekday = (today + offset) % 7;
        let day_lessons: Vec<LessonView> = views
            .iter()
            .filter(|v| v.lesson.weekday == weekday)
            .cloned()
            .collect();
        if !day_lessons.is_empty() {
            upcoming.push(UpcomingDay {
                day: weekday_name(weekday),
                weekday,
                lessons: day_lessons,
            });
        }
    }

    Ok(respond::ok(
        UpcomingLessonsResponse {
            lessons: views,
            upcoming,
        },
        "Lessons retrieved successfully",
    ))
}
