use serde::Deserialize;

use super::entities::{Address, ProfilePhoto, UserRole};

// 管理员直接创建用户（学生需要班级，教师可带科目）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub age: Option<i32>,
    pub cpf: Option<String>,
    pub address: Option<Address>,
    pub class_id: Option<i64>,
    #[serde(default)]
    pub subject_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
    pub cpf: Option<String>,
    pub address: Option<Address>,
}

/// Storage 层的新用户行，密码已经哈希完成
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub age: Option<i32>,
    pub cpf: Option<String>,
    pub address: Option<Address>,
    pub photo: Option<ProfilePhoto>,
}

/// Storage 层的用户更新字段，None 表示保持不变
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub age: Option<i32>,
    pub cpf: Option<String>,
    pub address: Option<Address>,
}
