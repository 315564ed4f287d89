use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::GuardianService;
use crate::errors::Result;
use crate::models::SortOrder;
use crate::models::guardians::{
    entities::Guardian,
    requests::{CreateGuardianRequest, GuardianListQuery, UpdateGuardianRequest},
    responses::{GuardianStudentItem, GuardianToggleActiveResponse, GuardianWithStudents},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond;
use crate::storage::Storage;

/// 组装监护人 + 名下学生
pub(crate) async fn build_guardian_view(
    storage: &Arc<dyn Storage>,
    guardian: Guardian,
) -> Result<GuardianWithStudents> {
    let students = storage.students_of_guardian(guardian.id).await?;

    let mut items = Vec::with_capacity(students.len());
    for student in students {
        let name = match storage.get_user_by_id(student.user_id).await? {
            Some(user) => user.name,
            None => continue,
        };
        let class_name = match student.class_id {
            Some(class_id) => storage.get_class_by_id(class_id).await?.map(|c| c.name),
            None => None,
        };
        items.push(GuardianStudentItem {
            student_id: student.id,
            name,
            status: student.status,
            class_name,
        });
    }

    Ok(GuardianWithStudents {
        guardian,
        students: items,
    })
}

/// CPF/电话/邮箱在用户表和监护人表里都必须唯一
async fn check_uniqueness(
    storage: &Arc<dyn Storage>,
    cpf: &str,
    phone: &str,
    email: &str,
    exclude_guardian: Option<i64>,
) -> Result<Option<HttpResponse>> {
    if storage.get_user_by_cpf(cpf).await?.is_some() {
        return Ok(Some(respond::bad_request(
            ErrorCode::CpfAlreadyExists,
            "CPF is already registered",
        )));
    }
    if let Some(existing) = storage.get_guardian_by_cpf(cpf).await?
        && Some(existing.id) != exclude_guardian
    {
        return Ok(Some(respond::bad_request(
            ErrorCode::CpfAlreadyExists,
            "CPF is already registered",
        )));
    }

    if let Some(existing) = storage.get_guardian_by_phone(phone).await?
        && Some(existing.id) != exclude_guardian
    {
        return Ok(Some(respond::bad_request(
            ErrorCode::PhoneAlreadyExists,
            "Phone is already registered",
        )));
    }

    if storage.get_user_by_email(email).await?.is_some() {
        return Ok(Some(respond::bad_request(
            ErrorCode::EmailAlreadyExists,
            "Email is already registered",
        )));
    }
    if let Some(existing) = storage.get_guardian_by_email(email).await?
        && Some(existing.id) != exclude_guardian
    {
        return Ok(Some(respond::bad_request(
            ErrorCode::EmailAlreadyExists,
            "Email is already registered",
        )));
    }

    Ok(None)
}

pub async fn create_guardian(
    service: &GuardianService,
    request: &HttpRequest,
    mut guardian_data: CreateGuardianRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if guardian_data.name.trim().is_empty()
        || guardian_data.cpf.trim().is_empty()
        || guardian_data.phone.trim().is_empty()
        || guardian_data.email.trim().is_empty()
    {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "All fields are required",
        ));
    }

    guardian_data.email = guardian_data.email.trim().to_lowercase();

    match check_uniqueness(
        &storage,
        &guardian_data.cpf,
        &guardian_data.phone,
        &guardian_data.email,
        None,
    )
    .await
    {
        Ok(Some(response)) => return Ok(response),
        Ok(None) => {}
        Err(e) => return Ok(respond::internal("Failed to check uniqueness", e)),
    }

    let guardian = match storage.create_guardian(&guardian_data).await {
        Ok(guardian) => guardian,
        Err(e) => return Ok(respond::internal("Failed to create guardian", e)),
    };

    // 双向关联学生
    for student_id in &guardian_data.student_ids {
        if let Err(e) = storage.add_student_guardian(*student_id, guardian.id).await {
            tracing::warn!("Failed to link student {}: {}", student_id, e);
        }
    }

    info!("Guardian {} created", guardian.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        guardian,
        "Guardian created successfully",
    )))
}

pub async fn list_guardians(
    service: &GuardianService,
    request: &HttpRequest,
    query: GuardianListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let guardians = match storage.list_guardians(query.student_id).await {
        Ok(guardians) => guardians,
        Err(e) => return Ok(respond::internal("Failed to list guardians", e)),
    };

    let mut views = Vec::with_capacity(guardians.len());
    for guardian in guardians {
        match build_guardian_view(&storage, guardian).await {
            Ok(view) => views.push(view),
            Err(e) => return Ok(respond::internal("Failed to build guardian view", e)),
        }
    }

    // 默认按姓名排序
    match query.order.unwrap_or(SortOrder::AZ) {
        SortOrder::AZ => views.sort_by(|a, b| a.guardian.name.cmp(&b.guardian.name)),
        SortOrder::ZA => views.sort_by(|a, b| b.guardian.name.cmp(&a.guardian.name)),
        SortOrder::Recent => views.sort_by(|a, b| b.guardian.created_at.cmp(&a.guardian.created_at)),
        SortOrder::Oldest => views.sort_by(|a, b| a.guardian.created_at.cmp(&b.guardian.created_at)),
    }

    Ok(respond::ok(views, "Guardians retrieved successfully"))
}

pub async fn get_guardian(
    service: &GuardianService,
    request: &HttpRequest,
    guardian_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let guardian = match storage.get_guardian_by_id(guardian_id).await {
        Ok(Some(guardian)) => guardian,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::GuardianNotFound,
                "Guardian not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get guardian", e)),
    };

    match build_guardian_view(&storage, guardian).await {
        Ok(view) => Ok(respond::ok(view, "Guardian retrieved successfully")),
        Err(e) => Ok(respond::internal("Failed to build guardian view", e)),
    }
}

pub async fn update_guardian(
    service: &GuardianService,
    request: &HttpRequest,
    guardian_id: i64,
    mut update_data: UpdateGuardianRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if update_data.name.trim().is_empty()
        || update_data.cpf.trim().is_empty()
        || update_data.phone.trim().is_empty()
        || update_data.email.trim().is_empty()
    {
        return Ok(respond::bad_request(
            ErrorCode::BadRequest,
            "All fields are required",
        ));
    }

    match storage.get_guardian_by_id(guardian_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::GuardianNotFound,
                "Guardian not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get guardian", e)),
    }

    update_data.email = update_data.email.trim().to_lowercase();

    match check_uniqueness(
        &storage,
        &update_data.cpf,
        &update_data.phone,
        &update_data.email,
        Some(guardian_id),
    )
    .await
    {
        Ok(Some(response)) => return Ok(response),
        Ok(None) => {}
        Err(e) => return Ok(respond::internal("Failed to check uniqueness", e)),
    }

    match storage.update_guardian(guardian_id, &update_data).await {
        Ok(Some(guardian)) => match build_guardian_view(&storage, guardian).await {
            Ok(view) => Ok(respond::ok(view, "Guardian updated successfully")),
            Err(e) => Ok(respond::internal("Failed to build guardian view", e)),
        },
        Ok(None) => Ok(respond::not_found(
            ErrorCode::GuardianNotFound,
            "Guardian not found",
        )),
        Err(e) => Ok(respond::internal("Failed to update guardian", e)),
    }
}

pub async fn toggle_active(
    service: &GuardianService,
    request: &HttpRequest,
    guardian_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let guardian = match storage.get_guardian_by_id(guardian_id).await {
        Ok(Some(guardian)) => guardian,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::GuardianNotFound,
                "Guardian not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get guardian", e)),
    };

    let new_active = !guardian.active;
    let updated = match storage.set_guardian_active(guardian_id, new_active).await {
        Ok(Some(guardian)) => guardian,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::GuardianNotFound,
                "Guardian not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to toggle guardian", e)),
    };

    match build_guardian_view(&storage, updated).await {
        Ok(view) => Ok(respond::ok(
            GuardianToggleActiveResponse {
                active: new_active,
                guardian: view,
            },
            if new_active {
                "Guardian activated successfully"
            } else {
                "Guardian deactivated successfully"
            },
        )),
        Err(e) => Ok(respond::internal("Failed to build guardian view", e)),
    }
}

pub async fn delete_guardian(
    service: &GuardianService,
    request: &HttpRequest,
    guardian_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_guardian_by_id(guardian_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::GuardianNotFound,
                "Guardian not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get guardian", e)),
    }

    // 学生侧的关联随外键一起清除
    match storage.delete_guardian(guardian_id).await {
        Ok(true) => {
            info!("Guardian {} deleted", guardian_id);
            Ok(respond::ok_empty("Guardian deleted successfully"))
        }
        Ok(false) => Ok(respond::not_found(
            ErrorCode::GuardianNotFound,
            "Guardian not found",
        )),
        Err(e) => Ok(respond::internal("Failed to delete guardian", e)),
    }
}
