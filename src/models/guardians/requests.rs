use serde::Deserialize;

use super::entities::GuardianRelationship;
use crate::models::SortOrder;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGuardianRequest {
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub relationship: GuardianRelationship,
    #[serde(default)]
    pub student_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGuardianRequest {
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub relationship: GuardianRelationship,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GuardianListQuery {
    pub student_id: Option<i64>,
    pub order: Option<SortOrder>,
}

// 监护人与学生的关联/解除关联
#[derive(Debug, Clone, Deserialize)]
pub struct GuardianStudentLinkRequest {
    pub guardian_id: i64,
    pub student_id: i64,
}
