use serde::{Deserialize, Serialize};

use crate::models::users::entities::{ProfilePhoto, User, UserRole};

// 登录响应中携带的用户摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: i64,
    pub name: String,
    pub role: UserRole,
    pub photo: Option<ProfilePhoto>,
}

impl From<&User> for LoginUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
            photo: user.photo.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: LoginUser,
}
