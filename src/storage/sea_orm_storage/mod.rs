//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod activities;
mod activity_scores;
mod attendances;
mod classes;
mod course_progress;
mod courses;
mod guardians;
mod report_cards;
mod students;
mod subjects;
mod teachers;
mod users;
mod weekly_lessons;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolSystemError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    activities::{
        entities::Activity,
        requests::{ActivityListQuery, CreateActivityRequest, UpdateActivityRequest},
    },
    activity_scores::{
        entities::{ActivityScore, ScoreStatus},
        requests::ScoreListQuery,
    },
    attendance::{entities::Attendance, requests::AttendanceListQuery},
    classes::{
        entities::{ClassShift, EducationLevel, SchoolClass},
        requests::{ClassListQuery, UpdateClassRequest},
    },
    course_progress::{entities::CourseProgress, requests::ProgressListQuery},
    courses::{entities::Course, requests::NewCourse},
    guardians::{
        entities::Guardian,
        requests::{CreateGuardianRequest, UpdateGuardianRequest},
    },
    report_cards::{
        entities::ReportCard,
        requests::{ReportCardListQuery, UpdateReportCardRequest},
    },
    students::entities::{Student, StudentStatus},
    subjects::{entities::Subject, requests::SubjectListQuery},
    teachers::entities::{Teacher, TeacherStatus},
    users::{
        entities::{ProfilePhoto, User},
        requests::{NewUser, UserUpdate},
    },
    weekly_lessons::{
        entities::WeeklyLesson,
        requests::{CreateWeeklyLessonRequest, UpdateWeeklyLessonRequest, WeeklyLessonQuery},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_cpf(&self, cpf: &str) -> Result<Option<User>> {
        self.get_user_by_cpf_impl(cpf).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl().await
    }

    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn set_user_active(&self, id: i64, active: bool) -> Result<Option<User>> {
        self.set_user_active_impl(id, active).await
    }

    async fn set_user_photo(&self, id: i64, photo: Option<ProfilePhoto>) -> Result<Option<User>> {
        self.set_user_photo_impl(id, photo).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学生模块
    async fn create_student(&self, user_id: i64, class_id: Option<i64>) -> Result<Student> {
        self.create_student_impl(user_id, class_id).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students(&self, status: Option<StudentStatus>) -> Result<Vec<Student>> {
        self.list_students_impl(status).await
    }

    async fn set_student_status(&self, id: i64, status: StudentStatus) -> Result<bool> {
        self.set_student_status_impl(id, status).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn set_student_guardians(&self, student_id: i64, guardian_ids: &[i64]) -> Result<()> {
        self.set_student_guardians_impl(student_id, guardian_ids)
            .await
    }

    async fn guardian_ids_of_student(&self, student_id: i64) -> Result<Vec<i64>> {
        self.guardian_ids_of_student_impl(student_id).await
    }

    async fn add_student_guardian(&self, student_id: i64, guardian_id: i64) -> Result<()> {
        self.add_student_guardian_impl(student_id, guardian_id).await
    }

    async fn remove_student_guardian(&self, student_id: i64, guardian_id: i64) -> Result<()> {
        self.remove_student_guardian_impl(student_id, guardian_id)
            .await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    // 教师模块
    async fn create_teacher(&self, user_id: i64) -> Result<Teacher> {
        self.create_teacher_impl(user_id).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn list_teachers(&self, status: Option<TeacherStatus>) -> Result<Vec<Teacher>> {
        self.list_teachers_impl(status).await
    }

    async fn set_teacher_status(&self, id: i64, status: TeacherStatus) -> Result<bool> {
        self.set_teacher_status_impl(id, status).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    async fn set_teacher_subjects(&self, teacher_id: i64, subject_ids: &[i64]) -> Result<()> {
        self.set_teacher_subjects_impl(teacher_id, subject_ids)
            .await
    }

    async fn subject_ids_of_teacher(&self, teacher_id: i64) -> Result<Vec<i64>> {
        self.subject_ids_of_teacher_impl(teacher_id).await
    }

    async fn teachers_of_subject(&self, subject_id: i64) -> Result<Vec<Teacher>> {
        self.teachers_of_subject_impl(subject_id).await
    }

    async fn count_teachers(&self) -> Result<u64> {
        self.count_teachers_impl().await
    }

    // 监护人模块
    async fn create_guardian(&self, guardian: &CreateGuardianRequest) -> Result<Guardian> {
        self.create_guardian_impl(guardian).await
    }

    async fn get_guardian_by_id(&self, id: i64) -> Result<Option<Guardian>> {
        self.get_guardian_by_id_impl(id).await
    }

    async fn get_guardians_by_ids(&self, ids: &[i64]) -> Result<Vec<Guardian>> {
        self.get_guardians_by_ids_impl(ids).await
    }

    async fn get_guardian_by_cpf(&self, cpf: &str) -> Result<Option<Guardian>> {
        self.get_guardian_by_cpf_impl(cpf).await
    }

    async fn get_guardian_by_phone(&self, phone: &str) -> Result<Option<Guardian>> {
        self.get_guardian_by_phone_impl(phone).await
    }

    async fn get_guardian_by_email(&self, email: &str) -> Result<Option<Guardian>> {
        self.get_guardian_by_email_impl(email).await
    }

    async fn list_guardians(&self, student_id: Option<i64>) -> Result<Vec<Guardian>> {
        self.list_guardians_impl(student_id).await
    }

    async fn update_guardian(
        &self,
        id: i64,
        update: &UpdateGuardianRequest,
    ) -> Result<Option<Guardian>> {
        self.update_guardian_impl(id, update).await
    }

    async fn set_guardian_active(&self, id: i64, active: bool) -> Result<Option<Guardian>> {
        self.set_guardian_active_impl(id, active).await
    }

    async fn students_of_guardian(&self, guardian_id: i64) -> Result<Vec<Student>> {
        self.students_of_guardian_impl(guardian_id).await
    }

    async fn delete_guardian(&self, id: i64) -> Result<bool> {
        self.delete_guardian_impl(id).await
    }

    // 班级模块
    async fn create_class(
        &self,
        name: &str,
        school_year: i32,
        shift: ClassShift,
        education_level: EducationLevel,
    ) -> Result<SchoolClass> {
        self.create_class_impl(name, school_year, shift, education_level)
            .await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<SchoolClass>> {
        self.get_class_by_id_impl(id).await
    }

    async fn find_class_duplicate(
        &self,
        name: &str,
        school_year: i32,
        education_level: EducationLevel,
    ) -> Result<Option<SchoolClass>> {
        self.find_class_duplicate_impl(name, school_year, education_level)
            .await
    }

    async fn list_classes(&self, query: &ClassListQuery) -> Result<Vec<SchoolClass>> {
        self.list_classes_impl(query).await
    }

    async fn update_class(
        &self,
        id: i64,
        update: &UpdateClassRequest,
    ) -> Result<Option<SchoolClass>> {
        self.update_class_impl(id, update).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    async fn set_class_students(&self, class_id: i64, student_ids: &[i64]) -> Result<()> {
        self.set_class_students_impl(class_id, student_ids).await
    }

    async fn set_class_teachers(&self, class_id: i64, teacher_ids: &[i64]) -> Result<()> {
        self.set_class_teachers_impl(class_id, teacher_ids).await
    }

    async fn set_class_subjects(&self, class_id: i64, subject_ids: &[i64]) -> Result<()> {
        self.set_class_subjects_impl(class_id, subject_ids).await
    }

    async fn add_class_teacher(&self, class_id: i64, teacher_id: i64) -> Result<()> {
        self.add_class_teacher_impl(class_id, teacher_id).await
    }

    async fn student_ids_of_class(&self, class_id: i64) -> Result<Vec<i64>> {
        self.student_ids_of_class_impl(class_id).await
    }

    async fn teacher_ids_of_class(&self, class_id: i64) -> Result<Vec<i64>> {
        self.teacher_ids_of_class_impl(class_id).await
    }

    async fn subject_ids_of_class(&self, class_id: i64) -> Result<Vec<i64>> {
        self.subject_ids_of_class_impl(class_id).await
    }

    async fn classes_of_student(&self, student_id: i64) -> Result<Vec<SchoolClass>> {
        self.classes_of_student_impl(student_id).await
    }

    async fn classes_of_teacher(&self, teacher_id: i64) -> Result<Vec<SchoolClass>> {
        self.classes_of_teacher_impl(teacher_id).await
    }

    async fn active_class_of_student(
        &self,
        student_id: i64,
        school_year: i32,
    ) -> Result<Option<SchoolClass>> {
        self.active_class_of_student_impl(student_id, school_year)
            .await
    }

    async fn class_of_student_in_year(
        &self,
        student_id: i64,
        school_year: i32,
    ) -> Result<Option<SchoolClass>> {
        self.class_of_student_in_year_impl(student_id, school_year)
            .await
    }

    async fn count_classes(&self) -> Result<u64> {
        self.count_classes_impl().await
    }

    // 科目模块
    async fn create_subject(&self, name: &str, description: Option<String>) -> Result<Subject> {
        self.create_subject_impl(name, description).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>> {
        self.get_subject_by_name_impl(name).await
    }

    async fn list_subjects(&self, query: &SubjectListQuery) -> Result<Vec<Subject>> {
        self.list_subjects_impl(query).await
    }

    async fn subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>> {
        self.subjects_by_ids_impl(ids).await
    }

    async fn update_subject(
        &self,
        id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, name, description).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    async fn count_subjects(&self) -> Result<u64> {
        self.count_subjects_impl().await
    }

    // 活动模块
    async fn create_activity(
        &self,
        request: &CreateActivityRequest,
        teacher_id: i64,
    ) -> Result<Activity> {
        self.create_activity_impl(request, teacher_id).await
    }

    async fn find_active_slot_duplicate(
        &self,
        request: &CreateActivityRequest,
    ) -> Result<Option<Activity>> {
        self.find_active_slot_duplicate_impl(request).await
    }

    async fn get_activity_by_id(&self, id: i64) -> Result<Option<Activity>> {
        self.get_activity_by_id_impl(id).await
    }

    async fn list_activities(
        &self,
        teacher_id: Option<i64>,
        class_id: Option<i64>,
        query: &ActivityListQuery,
    ) -> Result<Vec<Activity>> {
        self.list_activities_impl(teacher_id, class_id, query).await
    }

    async fn activities_of_class(&self, class_id: i64) -> Result<Vec<Activity>> {
        self.activities_of_class_impl(class_id).await
    }

    async fn activities_on_date(
        &self,
        class_id: i64,
        subject_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Vec<Activity>> {
        self.activities_on_date_impl(class_id, subject_id, date)
            .await
    }

    async fn update_activity(
        &self,
        id: i64,
        update: &UpdateActivityRequest,
    ) -> Result<Option<Activity>> {
        self.update_activity_impl(id, update).await
    }

    async fn delete_activity(&self, id: i64) -> Result<bool> {
        self.delete_activity_impl(id).await
    }

    // 活动成绩模块
    async fn create_score(
        &self,
        activity: &Activity,
        student_id: i64,
        period: &str,
        value: Option<f64>,
        status: ScoreStatus,
    ) -> Result<ActivityScore> {
        self.create_score_impl(activity, student_id, period, value, status)
            .await
    }

    async fn get_score_by_id(&self, id: i64) -> Result<Option<ActivityScore>> {
        self.get_score_by_id_impl(id).await
    }

    async fn list_scores(
        &self,
        teacher_id: Option<i64>,
        query: &ScoreListQuery,
        activity_ids: Option<&[i64]>,
    ) -> Result<Vec<ActivityScore>> {
        self.list_scores_impl(teacher_id, query, activity_ids).await
    }

    async fn get_score_by_student_activity(
        &self,
        student_id: i64,
        activity_id: i64,
    ) -> Result<Option<ActivityScore>> {
        self.get_score_by_student_activity_impl(student_id, activity_id)
            .await
    }

    async fn update_score(
        &self,
        id: i64,
        value: Option<Option<f64>>,
        status: Option<ScoreStatus>,
    ) -> Result<Option<ActivityScore>> {
        self.update_score_impl(id, value, status).await
    }

    async fn delete_score(&self, id: i64) -> Result<bool> {
        self.delete_score_impl(id).await
    }

    async fn delete_scores_of_activity(&self, activity_id: i64) -> Result<u64> {
        self.delete_scores_of_activity_impl(activity_id).await
    }

    async fn scores_for_report(
        &self,
        student_id: i64,
        subject_id: i64,
        class_id: i64,
        period: &str,
    ) -> Result<Vec<ActivityScore>> {
        self.scores_for_report_impl(student_id, subject_id, class_id, period)
            .await
    }

    async fn scores_of_student_in_class(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Vec<ActivityScore>> {
        self.scores_of_student_in_class_impl(student_id, class_id)
            .await
    }

    // 成绩单模块
    async fn create_report_card(
        &self,
        student_id: i64,
        teacher_id: i64,
        subject_id: i64,
        class_id: i64,
        period: &str,
    ) -> Result<ReportCard> {
        self.create_report_card_impl(student_id, teacher_id, subject_id, class_id, period)
            .await
    }

    async fn get_report_card_by_id(&self, id: i64) -> Result<Option<ReportCard>> {
        self.get_report_card_by_id_impl(id).await
    }

    async fn find_report_card(
        &self,
        student_id: i64,
        subject_id: i64,
        class_id: i64,
        period: &str,
    ) -> Result<Option<ReportCard>> {
        self.find_report_card_impl(student_id, subject_id, class_id, period)
            .await
    }

    async fn list_report_cards(
        &self,
        teacher_id: Option<i64>,
        student_id: Option<i64>,
        query: &ReportCardListQuery,
    ) -> Result<Vec<ReportCard>> {
        self.list_report_cards_impl(teacher_id, student_id, query)
            .await
    }

    async fn update_report_card(
        &self,
        id: i64,
        update: &UpdateReportCardRequest,
    ) -> Result<Option<ReportCard>> {
        self.update_report_card_impl(id, update).await
    }

    async fn set_final_average(&self, id: i64, average: f64) -> Result<bool> {
        self.set_final_average_impl(id, average).await
    }

    async fn delete_report_card(&self, id: i64) -> Result<bool> {
        self.delete_report_card_impl(id).await
    }

    // 出勤模块
    async fn find_attendance_on(
        &self,
        student_id: i64,
        class_id: i64,
        subject_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Option<Attendance>> {
        self.find_attendance_on_impl(student_id, class_id, subject_id, date)
            .await
    }

    async fn create_attendance(
        &self,
        student_id: i64,
        teacher_id: i64,
        class_id: i64,
        subject_id: i64,
        date: chrono::NaiveDate,
        present: bool,
    ) -> Result<Attendance> {
        self.create_attendance_impl(student_id, teacher_id, class_id, subject_id, date, present)
            .await
    }

    async fn set_attendance_present(&self, id: i64, present: bool) -> Result<Option<Attendance>> {
        self.set_attendance_present_impl(id, present).await
    }

    async fn list_attendances(
        &self,
        teacher_id: Option<i64>,
        student_id: Option<i64>,
        query: &AttendanceListQuery,
        present: Option<bool>,
    ) -> Result<Vec<Attendance>> {
        self.list_attendances_impl(teacher_id, student_id, query, present)
            .await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    // 每周课程表模块
    async fn create_weekly_lesson(
        &self,
        request: &CreateWeeklyLessonRequest,
    ) -> Result<WeeklyLesson> {
        self.create_weekly_lesson_impl(request).await
    }

    async fn find_teacher_time_conflict(
        &self,
        teacher_id: i64,
        weekday: i32,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<WeeklyLesson>> {
        self.find_teacher_time_conflict_impl(teacher_id, weekday, start_time, end_time)
            .await
    }

    async fn get_weekly_lesson_by_id(&self, id: i64) -> Result<Option<WeeklyLesson>> {
        self.get_weekly_lesson_by_id_impl(id).await
    }

    async fn list_weekly_lessons(
        &self,
        teacher_id: Option<i64>,
        class_id: Option<i64>,
        query: &WeeklyLessonQuery,
    ) -> Result<Vec<WeeklyLesson>> {
        self.list_weekly_lessons_impl(teacher_id, class_id, query)
            .await
    }

    async fn active_lessons_of_class(&self, class_id: i64) -> Result<Vec<WeeklyLesson>> {
        self.active_lessons_of_class_impl(class_id).await
    }

    async fn find_active_lesson(
        &self,
        class_id: i64,
        subject_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<WeeklyLesson>> {
        self.find_active_lesson_impl(class_id, subject_id, teacher_id)
            .await
    }

    async fn class_ids_with_active_lessons(&self, teacher_id: i64) -> Result<Vec<i64>> {
        self.class_ids_with_active_lessons_impl(teacher_id).await
    }

    async fn update_weekly_lesson(
        &self,
        id: i64,
        update: &UpdateWeeklyLessonRequest,
    ) -> Result<Option<WeeklyLesson>> {
        self.update_weekly_lesson_impl(id, update).await
    }

    async fn delete_weekly_lesson(&self, id: i64) -> Result<bool> {
        self.delete_weekly_lesson_impl(id).await
    }

    // 内容课程模块
    async fn create_course(&self, course: NewCourse) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses(
        &self,
        teacher_id: Option<i64>,
        allowed_class_id: Option<i64>,
        only_active: bool,
    ) -> Result<Vec<Course>> {
        self.list_courses_impl(teacher_id, allowed_class_id, only_active)
            .await
    }

    async fn save_course(&self, course: &Course) -> Result<bool> {
        self.save_course_impl(course).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn set_course_classes(&self, course_id: i64, class_ids: &[i64]) -> Result<()> {
        self.set_course_classes_impl(course_id, class_ids).await
    }

    async fn class_ids_of_course(&self, course_id: i64) -> Result<Vec<i64>> {
        self.class_ids_of_course_impl(course_id).await
    }

    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<()> {
        self.enroll_student_impl(course_id, student_id).await
    }

    async fn enrolled_student_ids(&self, course_id: i64) -> Result<Vec<i64>> {
        self.enrolled_student_ids_impl(course_id).await
    }

    async fn is_student_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(course_id, student_id).await
    }

    async fn courses_of_teacher(&self, teacher_id: i64) -> Result<Vec<Course>> {
        self.courses_of_teacher_impl(teacher_id).await
    }

    async fn count_courses_of_teacher(&self, teacher_id: i64) -> Result<u64> {
        self.count_courses_of_teacher_impl(teacher_id).await
    }

    async fn delete_orphan_courses(&self) -> Result<u64> {
        self.delete_orphan_courses_impl().await
    }

    // 课程进度模块
    async fn create_progress(&self, student_id: i64, course_id: i64) -> Result<CourseProgress> {
        self.create_progress_impl(student_id, course_id).await
    }

    async fn find_progress(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<CourseProgress>> {
        self.find_progress_impl(student_id, course_id).await
    }

    async fn save_progress(&self, progress: &CourseProgress) -> Result<bool> {
        self.save_progress_impl(progress).await
    }

    async fn list_progress(&self, query: &ProgressListQuery) -> Result<Vec<CourseProgress>> {
        self.list_progress_impl(query).await
    }

    async fn progress_of_student(&self, student_id: i64) -> Result<Vec<CourseProgress>> {
        self.progress_of_student_impl(student_id).await
    }

    async fn delete_progress_of_course(&self, course_id: i64) -> Result<u64> {
        self.delete_progress_of_course_impl(course_id).await
    }
}
