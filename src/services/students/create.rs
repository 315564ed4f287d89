use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::students::responses::StudentMutationResponse;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::NewUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond;
use crate::utils::password::hash_password;
use crate::utils::validate::{format_postal_code, validate_postal_code};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 必填字段
    if student_data.name.trim().is_empty()
        || student_data.email.trim().is_empty()
        || student_data.password.is_empty()
    {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "Name, email and password are required",
        ));
    }

    if let Err(e) = validate_postal_code(&student_data.postal_code) {
        return Ok(respond::bad_request(ErrorCode::BadRequest, e));
    }

    // 邮箱查重
    match storage.get_user_by_email(student_data.email.trim()).await {
        Ok(Some(_)) => {
            return Ok(respond::bad_request(
                ErrorCode::EmailAlreadyExists,
                "Email is already registered",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(respond::internal("Failed to check email", e)),
    }

    // CPF 查重
    if let Some(cpf) = &student_data.cpf {
        match storage.get_user_by_cpf(cpf).await {
            Ok(Some(_)) => {
                return Ok(respond::bad_request(
                    ErrorCode::CpfAlreadyExists,
                    "CPF is already registered",
                ));
            }
            Ok(None) => {}
            Err(e) => return Ok(respond::internal("Failed to check CPF", e)),
        }
    }

    let password_hash = match hash_password(&student_data.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(respond::internal("Password hashing failed", e)),
    };

    // 地址带格式化后的邮编
    let mut address = student_data.address.clone();
    address.postal_code = format_postal_code(&student_data.postal_code);

    let user = match storage
        .create_user(NewUser {
            name: student_data.name.trim().to_string(),
            email: student_data.email.trim().to_lowercase(),
            password_hash,
            role: UserRole::Student,
            age: student_data.age,
            cpf: student_data.cpf.clone(),
            address: Some(address),
            photo: None,
        })
        .await
    {
        Ok(user) => user,
        Err(e) => return Ok(respond::internal("Failed to create user", e)),
    };

    // 监护人校验；失败时补偿删除刚创建的用户行
    if student_data.guardian_ids.is_empty() {
        let _ = storage.delete_user(user.id).await;
        return Ok(respond::bad_request(
            ErrorCode::GuardianRequired,
            "At least one guardian is required",
        ));
    }
    if student_data.guardian_ids.len() > 2 {
        let _ = storage.delete_user(user.id).await;
        return Ok(respond::bad_request(
            ErrorCode::GuardianLimitExceeded,
            "At most 2 guardians are allowed",
        ));
    }
    match storage.get_guardians_by_ids(&student_data.guardian_ids).await {
        Ok(guardians) if guardians.len() == student_data.guardian_ids.len() => {}
        Ok(_) => {
            let _ = storage.delete_user(user.id).await;
            return Ok(respond::bad_request(
                ErrorCode::GuardianNotFound,
                "One or more guardians were not found",
            ));
        }
        Err(e) => {
            let _ = storage.delete_user(user.id).await;
            return Ok(respond::internal("Failed to check guardians", e));
        }
    }

    // 创建学生（班级在班级管理界面里再分配）
    let student = match storage.create_student(user.id, None).await {
        Ok(student) => student,
        Err(e) => {
            error!("Failed to create student row: {}", e);
            let _ = storage.delete_user(user.id).await;
            return Ok(respond::internal("Failed to create student", e));
        }
    };

    if let Err(e) = storage
        .set_student_guardians(student.id, &student_data.guardian_ids)
        .await
    {
        error!("Failed to link guardians: {}", e);
    }

    info!("Student {} created for user {}", student.id, user.email);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        StudentMutationResponse {
            user_id: user.id,
            student_id: student.id,
        },
        "Student created successfully",
    )))
}
