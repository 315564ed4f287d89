//! SchoolSystem - 学校管理平台后端服务
//!
//! 基于 Actix Web 构建的学校管理系统后端：认证、学生/教师/班级/科目/
//! 监护人管理、出勤、活动与成绩聚合、每周课程表、内容课程与进度追踪、
//! 媒体托管上传。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `media`: 云媒体托管客户端
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod media;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
