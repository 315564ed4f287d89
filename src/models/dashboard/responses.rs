use serde::Serialize;

// 仪表盘统计；各角色可见的字段不同，缺席的字段不序列化
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    pub subjects: u64,
    pub students: u64,
    pub classes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teachers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<u64>,
}
