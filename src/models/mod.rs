//! 业务模型定义
//!
//! 与 entity 模块的数据库实体分离，HTTP 层只接触这里的类型。

pub mod common;

pub mod activities;
pub mod activity_scores;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod course_progress;
pub mod courses;
pub mod dashboard;
pub mod guardians;
pub mod report_cards;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod uploads;
pub mod users;
pub mod weekly_lessons;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};

/// 程序启动时间，用于健康检查的 uptime 计算
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 定义字符串映射枚举的宏
///
/// 自动生成 as_str()、Display、FromStr 以及 serde 的字符串序列化实现。
#[macro_export]
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(format!(
                        "无效的取值: '{s}'. 支持: {}",
                        [$($value),+].join(", ")
                    )),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_enum! {
    /// 学期（上/下），序列化为 "1" / "2"
    Semester {
        First => "1",
        Second => "2",
    }
}

impl Semester {
    /// 组合成绩单使用的学期标识，例如 "2026/1"
    pub fn period_for(&self, year: i32) -> String {
        format!("{year}/{}", self.as_str())
    }
}

/// 通用的列表排序参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    AZ,
    ZA,
    #[default]
    Recent,
    Oldest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_roundtrip() {
        assert_eq!(Semester::First.as_str(), "1");
        assert_eq!("2".parse::<Semester>().unwrap(), Semester::Second);
        assert!("3".parse::<Semester>().is_err());
    }

    #[test]
    fn test_period_format() {
        assert_eq!(Semester::Second.period_for(2026), "2026/2");
    }

    #[test]
    fn test_sort_order_deserialize() {
        let order: SortOrder = serde_json::from_str("\"a-z\"").unwrap();
        assert_eq!(order, SortOrder::AZ);
        let order: SortOrder = serde_json::from_str("\"recent\"").unwrap();
        assert_eq!(order, SortOrder::Recent);
    }
}
