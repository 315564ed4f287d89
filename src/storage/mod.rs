use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过CPF获取用户信息
    async fn get_user_by_cpf(&self, cpf: &str) -> Result<Option<User>>;
    // 列出用户（创建时间倒序）
    async fn list_users(&self) -> Result<Vec<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 启用/停用账号
    async fn set_user_active(&self, id: i64, active: bool) -> Result<Option<User>>;
    // 更新头像引用
    async fn set_user_photo(&self, id: i64, photo: Option<ProfilePhoto>) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 学生管理方法
    async fn create_student(&self, user_id: i64, class_id: Option<i64>) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn list_students(&self, status: Option<StudentStatus>) -> Result<Vec<Student>>;
    async fn set_student_status(&self, id: i64, status: StudentStatus) -> Result<bool>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 整体替换学生的监护人关联
    async fn set_student_guardians(&self, student_id: i64, guardian_ids: &[i64]) -> Result<()>;
    async fn guardian_ids_of_student(&self, student_id: i64) -> Result<Vec<i64>>;
    async fn add_student_guardian(&self, student_id: i64, guardian_id: i64) -> Result<()>;
    async fn remove_student_guardian(&self, student_id: i64, guardian_id: i64) -> Result<()>;
    async fn count_students(&self) -> Result<u64>;

    /// 教师管理方法
    async fn create_teacher(&self, user_id: i64) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self, status: Option<TeacherStatus>) -> Result<Vec<Teacher>>;
    async fn set_teacher_status(&self, id: i64, status: TeacherStatus) -> Result<bool>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
    // 整体替换教师的科目关联
    async fn set_teacher_subjects(&self, teacher_id: i64, subject_ids: &[i64]) -> Result<()>;
    async fn subject_ids_of_teacher(&self, teacher_id: i64) -> Result<Vec<i64>>;
    async fn teachers_of_subject(&self, subject_id: i64) -> Result<Vec<Teacher>>;
    async fn count_teachers(&self) -> Result<u64>;

    /// 监护人管理方法
    async fn create_guardian(&self, guardian: &CreateGuardianRequest) -> Result<Guardian>;
    async fn get_guardian_by_id(&self, id: i64) -> Result<Option<Guardian>>;
    async fn get_guardians_by_ids(&self, ids: &[i64]) -> Result<Vec<Guardian>>;
    async fn get_guardian_by_cpf(&self, cpf: &str) -> Result<Option<Guardian>>;
    async fn get_guardian_by_phone(&self, phone: &str) -> Result<Option<Guardian>>;
    async fn get_guardian_by_email(&self, email: &str) -> Result<Option<Guardian>>;
    // 列出监护人，可按关联学生过滤
    async fn list_guardians(&self, student_id: Option<i64>) -> Result<Vec<Guardian>>;
    async fn update_guardian(
        &self,
        id: i64,
        update: &UpdateGuardianRequest,
    ) -> Result<Option<Guardian>>;
    async fn set_guardian_active(&self, id: i64, active: bool) -> Result<Option<Guardian>>;
    async fn students_of_guardian(&self, guardian_id: i64) -> Result<Vec<Student>>;
    async fn delete_guardian(&self, id: i64) -> Result<bool>;

    /// 班级管理方法
    async fn create_class(
        &self,
        name: &str,
        school_year: i32,
        shift: ClassShift,
        education_level: EducationLevel,
    ) -> Result<SchoolClass>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<SchoolClass>>;
    // 同名同学年同阶段的班级查重
    async fn find_class_duplicate(
        &self,
        name: &str,
        school_year: i32,
        education_level: EducationLevel,
    ) -> Result<Option<SchoolClass>>;
    async fn list_classes(&self, query: &ClassListQuery) -> Result<Vec<SchoolClass>>;
    async fn update_class(
        &self,
        id: i64,
        update: &UpdateClassRequest,
    ) -> Result<Option<SchoolClass>>;
    async fn delete_class(&self, id: i64) -> Result<bool>;
    async fn set_class_students(&self, class_id: i64, student_ids: &[i64]) -> Result<()>;
    async fn set_class_teachers(&self, class_id: i64, teacher_ids: &[i64]) -> Result<()>;
    async fn set_class_subjects(&self, class_id: i64, subject_ids: &[i64]) -> Result<()>;
    // 幂等地把教师加入班级
    async fn add_class_teacher(&self, class_id: i64, teacher_id: i64) -> Result<()>;
    async fn student_ids_of_class(&self, class_id: i64) -> Result<Vec<i64>>;
    async fn teacher_ids_of_class(&self, class_id: i64) -> Result<Vec<i64>>;
    async fn subject_ids_of_class(&self, class_id: i64) -> Result<Vec<i64>>;
    // 学生的班级履历（学年倒序、名称升序）
    async fn classes_of_student(&self, student_id: i64) -> Result<Vec<SchoolClass>>;
    async fn classes_of_teacher(&self, teacher_id: i64) -> Result<Vec<SchoolClass>>;
    // 学生在某学年的在读班级（status = active）
    async fn active_class_of_student(
        &self,
        student_id: i64,
        school_year: i32,
    ) -> Result<Option<SchoolClass>>;
    // 学生在某学年的任意班级（用于"一年一班"查重）
    async fn class_of_student_in_year(
        &self,
        student_id: i64,
        school_year: i32,
    ) -> Result<Option<SchoolClass>>;
    async fn count_classes(&self) -> Result<u64>;

    /// 科目管理方法
    async fn create_subject(&self, name: &str, description: Option<String>) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>>;
    async fn list_subjects(&self, query: &SubjectListQuery) -> Result<Vec<Subject>>;
    async fn subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>>;
    async fn update_subject(
        &self,
        id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;
    async fn count_subjects(&self) -> Result<u64>;

    /// 活动（考试/作业）管理方法
    async fn create_activity(
        &self,
        request: &CreateActivityRequest,
        teacher_id: i64,
    ) -> Result<Activity>;
    // 同槽位同学期同班级同科目的活动查重（仅 active）
    async fn find_active_slot_duplicate(
        &self,
        request: &CreateActivityRequest,
    ) -> Result<Option<Activity>>;
    async fn get_activity_by_id(&self, id: i64) -> Result<Option<Activity>>;
    async fn list_activities(
        &self,
        teacher_id: Option<i64>,
        class_id: Option<i64>,
        query: &ActivityListQuery,
    ) -> Result<Vec<Activity>>;
    // 班级的全部未取消活动（成绩单聚合用）
    async fn activities_of_class(&self, class_id: i64) -> Result<Vec<Activity>>;
    // 某日某班级某科目的 active 活动
    async fn activities_on_date(
        &self,
        class_id: i64,
        subject_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Vec<Activity>>;
    async fn update_activity(
        &self,
        id: i64,
        update: &UpdateActivityRequest,
    ) -> Result<Option<Activity>>;
    async fn delete_activity(&self, id: i64) -> Result<bool>;

    /// 活动成绩管理方法
    async fn create_score(
        &self,
        activity: &Activity,
        student_id: i64,
        period: &str,
        value: Option<f64>,
        status: ScoreStatus,
    ) -> Result<ActivityScore>;
    async fn get_score_by_id(&self, id: i64) -> Result<Option<ActivityScore>>;
    async fn list_scores(
        &self,
        teacher_id: Option<i64>,
        query: &ScoreListQuery,
        activity_ids: Option<&[i64]>,
    ) -> Result<Vec<ActivityScore>>;
    async fn get_score_by_student_activity(
        &self,
        student_id: i64,
        activity_id: i64,
    ) -> Result<Option<ActivityScore>>;
    // value 外层 None 表示不变，Some(None) 表示清空
    async fn update_score(
        &self,
        id: i64,
        value: Option<Option<f64>>,
        status: Option<ScoreStatus>,
    ) -> Result<Option<ActivityScore>>;
    async fn delete_score(&self, id: i64) -> Result<bool>;
    async fn delete_scores_of_activity(&self, activity_id: i64) -> Result<u64>;
    // 某成绩单（学生/科目/班级/学期）关联的全部成绩
    async fn scores_for_report(
        &self,
        student_id: i64,
        subject_id: i64,
        class_id: i64,
        period: &str,
    ) -> Result<Vec<ActivityScore>>;
    // 学生在某班级的全部成绩（成绩单聚合用）
    async fn scores_of_student_in_class(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Vec<ActivityScore>>;

    /// 成绩单管理方法
    async fn create_report_card(
        &self,
        student_id: i64,
        teacher_id: i64,
        subject_id: i64,
        class_id: i64,
        period: &str,
    ) -> Result<ReportCard>;
    async fn get_report_card_by_id(&self, id: i64) -> Result<Option<ReportCard>>;
    async fn find_report_card(
        &self,
        student_id: i64,
        subject_id: i64,
        class_id: i64,
        period: &str,
    ) -> Result<Option<ReportCard>>;
    async fn list_report_cards(
        &self,
        teacher_id: Option<i64>,
        student_id: Option<i64>,
        query: &ReportCardListQuery,
    ) -> Result<Vec<ReportCard>>;
    async fn update_report_card(
        &self,
        id: i64,
        update: &UpdateReportCardRequest,
    ) -> Result<Option<ReportCard>>;
    async fn set_final_average(&self, id: i64, average: f64) -> Result<bool>;
    async fn delete_report_card(&self, id: i64) -> Result<bool>;

    /// 出勤管理方法
    async fn find_attendance_on(
        &self,
        student_id: i64,
        class_id: i64,
        subject_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Option<Attendance>>;
    async fn create_attendance(
        &self,
        student_id: i64,
        teacher_id: i64,
        class_id: i64,
        subject_id: i64,
        date: chrono::NaiveDate,
        present: bool,
    ) -> Result<Attendance>;
    async fn set_attendance_present(&self, id: i64, present: bool) -> Result<Option<Attendance>>;
    async fn list_attendances(
        &self,
        teacher_id: Option<i64>,
        student_id: Option<i64>,
        query: &AttendanceListQuery,
        present: Option<bool>,
    ) -> Result<Vec<Attendance>>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;

    /// 每周课程表管理方法
    async fn create_weekly_lesson(
        &self,
        request: &CreateWeeklyLessonRequest,
    ) -> Result<WeeklyLesson>;
    // 教师同一 weekday 时间段冲突检测（仅 active）
    async fn find_teacher_time_conflict(
        &self,
        teacher_id: i64,
        weekday: i32,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<WeeklyLesson>>;
    async fn get_weekly_lesson_by_id(&self, id: i64) -> Result<Option<WeeklyLesson>>;
    async fn list_weekly_lessons(
        &self,
        teacher_id: Option<i64>,
        class_id: Option<i64>,
        query: &WeeklyLessonQuery,
    ) -> Result<Vec<WeeklyLesson>>;
    async fn active_lessons_of_class(&self, class_id: i64) -> Result<Vec<WeeklyLesson>>;
    // 某班级+科目的 active 课时，可限定教师
    async fn find_active_lesson(
        &self,
        class_id: i64,
        subject_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<WeeklyLesson>>;
    // 教师有 active 课时的班级 ID 集合（去重）
    async fn class_ids_with_active_lessons(&self, teacher_id: i64) -> Result<Vec<i64>>;
    async fn update_weekly_lesson(
        &self,
        id: i64,
        update: &UpdateWeeklyLessonRequest,
    ) -> Result<Option<WeeklyLesson>>;
    async fn delete_weekly_lesson(&self, id: i64) -> Result<bool>;

    /// 内容课程管理方法
    async fn create_course(&self, course: NewCourse) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses(
        &self,
        teacher_id: Option<i64>,
        allowed_class_id: Option<i64>,
        only_active: bool,
    ) -> Result<Vec<Course>>;
    // 整体写回课程（章节 JSON + 标量字段）
    async fn save_course(&self, course: &Course) -> Result<bool>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    async fn set_course_classes(&self, course_id: i64, class_ids: &[i64]) -> Result<()>;
    async fn class_ids_of_course(&self, course_id: i64) -> Result<Vec<i64>>;
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<()>;
    async fn enrolled_student_ids(&self, course_id: i64) -> Result<Vec<i64>>;
    async fn is_student_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool>;
    async fn courses_of_teacher(&self, teacher_id: i64) -> Result<Vec<Course>>;
    async fn count_courses_of_teacher(&self, teacher_id: i64) -> Result<u64>;
    // 清理教师已不存在的孤儿课程，返回删除数量
    async fn delete_orphan_courses(&self) -> Result<u64>;

    /// 课程进度管理方法
    async fn create_progress(&self, student_id: i64, course_id: i64) -> Result<CourseProgress>;
    async fn find_progress(&self, student_id: i64, course_id: i64)
    -> Result<Option<CourseProgress>>;
    // 整体写回进度（完成课时 JSON + 标量字段）
    async fn save_progress(&self, progress: &CourseProgress) -> Result<bool>;
    async fn list_progress(&self, query: &ProgressListQuery) -> Result<Vec<CourseProgress>>;
    async fn progress_of_student(&self, student_id: i64) -> Result<Vec<CourseProgress>>;
    async fn delete_progress_of_course(&self, course_id: i64) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
