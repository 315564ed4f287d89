//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod activities;
pub mod activity_scores;
pub mod attendances;
pub mod class_students;
pub mod class_subjects;
pub mod class_teachers;
pub mod classes;
pub mod course_classes;
pub mod course_enrollments;
pub mod course_progress;
pub mod courses;
pub mod guardians;
pub mod report_cards;
pub mod student_guardians;
pub mod students;
pub mod subjects;
pub mod teacher_subjects;
pub mod teachers;
pub mod users;
pub mod weekly_lessons;
