pub mod activities;
pub mod activity_scores;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod course_progress;
pub mod courses;
pub mod dashboard;
pub mod guardians;
pub mod health;
pub mod report_cards;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod uploads;
pub mod users;
pub mod weekly_lessons;

pub use activities::configure_activity_routes;
pub use activity_scores::configure_activity_score_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_class_routes;
pub use course_progress::configure_course_progress_routes;
pub use courses::configure_course_routes;
pub use dashboard::configure_dashboard_routes;
pub use guardians::configure_guardian_routes;
pub use health::configure_health_routes;
pub use report_cards::configure_report_card_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use teachers::configure_teacher_routes;
pub use uploads::configure_upload_routes;
pub use users::configure_user_routes;
pub use weekly_lessons::configure_weekly_lesson_routes;
