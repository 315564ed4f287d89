use serde::{Deserialize, Serialize};

use crate::string_enum;

string_enum! {
    // 与学生的亲属关系
    GuardianRelationship {
        Father => "father",
        Mother => "mother",
        Grandparent => "grandparent",
        Sibling => "sibling",
        Tutor => "tutor",
        Other => "other",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guardian {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: Option<String>,
    pub relationship: GuardianRelationship,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
