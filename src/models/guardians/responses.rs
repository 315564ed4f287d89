use serde::Serialize;

use super::entities::{Guardian, GuardianRelationship};

// 监护人摘要（嵌在学生档案里）
#[derive(Debug, Clone, Serialize)]
pub struct GuardianSummary {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub relationship: GuardianRelationship,
}

impl From<&Guardian> for GuardianSummary {
    fn from(guardian: &Guardian) -> Self {
        Self {
            id: guardian.id,
            name: guardian.name.clone(),
            phone: guardian.phone.clone(),
            email: guardian.email.clone(),
            relationship: guardian.relationship,
        }
    }
}

// 监护人关联的学生摘要
#[derive(Debug, Clone, Serialize)]
pub struct GuardianStudentItem {
    pub student_id: i64,
    pub name: String,
    pub status: crate::models::students::entities::StudentStatus,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuardianWithStudents {
    #[serde(flatten)]
    pub guardian: Guardian,
    pub students: Vec<GuardianStudentItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuardianToggleActiveResponse {
    pub active: bool,
    pub guardian: GuardianWithStudents,
}
