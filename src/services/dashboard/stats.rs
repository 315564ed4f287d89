use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::DashboardService;
use crate::middlewares::RequireJWT;
use crate::models::dashboard::responses::DashboardStats;
use crate::models::users::entities::UserRole;
use crate::services::{current_teacher, respond};

pub async fn stats(service: &DashboardService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match RequireJWT::extract_user_role(request) {
        // 管理员看全局数量
        Some(UserRole::Admin) => {
            let subjects = match storage.count_subjects().await {
                Ok(count) => count,
                Err(e) => return Ok(respond::internal("Failed to count subjects", e)),
            };
            let students = match storage.count_students().await {
                Ok(count) => count,
                Err(e) => return Ok(respond::internal("Failed to count students", e)),
            };
            let teachers = match storage.count_teachers().await {
                Ok(count) => count,
                Err(e) => return Ok(respond::internal("Failed to count teachers", e)),
            };
            let classes = match storage.count_classes().await {
                Ok(count) => count,
                Err(e) => return Ok(respond::internal("Failed to count classes", e)),
            };

            Ok(respond::ok(
                DashboardStats {
                    subjects,
                    students,
                    classes,
                    teachers: Some(teachers),
                    courses: None,
                },
                "Stats retrieved successfully",
            ))
        }
        // 教师看自己的科目/班级/学生/课程
        Some(UserRole::Teacher) => {
            let teacher = match current_teacher(&storage, request).await {
                Ok(teacher) => teacher,
                // 没有教师档案时全部归零
                Err(_) => {
                    return Ok(respond::ok(
                        DashboardStats {
                            courses: Some(0),
                            ..Default::default()
                        },
                        "Stats retrieved successfully",
                    ));
                }
            };

            let subjects = match storage.subject_ids_of_teacher(teacher.id).await {
                Ok(ids) => ids.len() as u64,
                Err(e) => return Ok(respond::internal("Failed to load teacher subjects", e)),
            };

            // 只统计教师真正有课的班级
            let class_ids = match storage.class_ids_with_active_lessons(teacher.id).await {
                Ok(ids) => ids,
                Err(e) => return Ok(respond::internal("Failed to load teacher classes", e)),
            };

            // 跨班级的学生去重计数
            let mut student_ids: HashSet<i64> = HashSet::new();
            for class_id in &class_ids {
                match storage.student_ids_of_class(*class_id).await {
                    Ok(ids) => student_ids.extend(ids),
                    Err(e) => return Ok(respond::internal("Failed to load class roster", e)),
                }
            }

            let courses = match storage.count_courses_of_teacher(teacher.id).await {
                Ok(count) => count,
                Err(e) => return Ok(respond::internal("Failed to count courses", e)),
            };

            Ok(respond::ok(
                DashboardStats {
                    subjects,
                    students: student_ids.len() as u64,
                    classes: class_ids.len() as u64,
                    teachers: None,
                    courses: Some(courses),
                },
                "Stats retrieved successfully",
            ))
        }
        // 学生没有统计面板
        _ => Ok(respond::ok(
            DashboardStats::default(),
            "Stats retrieved successfully",
        )),
    }
}
