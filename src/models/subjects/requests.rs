use serde::Deserialize;

use super::entities::SubjectStatus;
use crate::models::SortOrder;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubjectRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SubjectListQuery {
    pub status: Option<SubjectStatus>,
    pub order: Option<SortOrder>,
}
