//! 成绩单聚合
//!
//! 对已加载的活动/成绩/缺勤/课表记录做纯函数聚合：
//! - 每学期五个槽位（PV1..PV3 / TB1..TB2），考试均分权重 3、作业均分权重 2
//! - 出勤率 = 100 - 缺勤次数 × (100 / 应到课时数)，应到课时数按课表
//!   weekday 在学期窗口内的出现次数累加
//! - 学期窗口固定：上学期 2月1日–6月30日，下学期 8月1日–11月30日

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Datelike, NaiveDate};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::activities::entities::{Activity, ActivitySlot};
use crate::models::activity_scores::entities::ActivityScore;
use crate::models::attendance::entities::Attendance;
use crate::models::classes::entities::SchoolClass;
use crate::models::classes::responses::ClassSummary;
use crate::models::students::requests::ReportCardQuery;
use crate::models::students::responses::{
    ReportCardResponse, SemesterSummary, SlotMark, SubjectHeader, SubjectReportRow,
    SubjectSituation,
};
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::UserRole;
use crate::models::weekly_lessons::entities::WeeklyLesson;
use crate::models::{ErrorCode, Semester};
use crate::services::{current_school_year, current_student, current_teacher, respond};

/// 四舍五入到 1 位小数
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 学期的固定日期窗口
pub fn semester_window(year: i32, semester: Semester) -> (NaiveDate, NaiveDate) {
    match semester {
        Semester::First => (
            NaiveDate::from_ymd_opt(year, 2, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(year, 6, 30).expect("valid date"),
        ),
        Semester::Second => (
            NaiveDate::from_ymd_opt(year, 8, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(year, 11, 30).expect("valid date"),
        ),
    }
}

/// weekday (0 = 周日) 在 [start, end] 内出现的次数
pub fn count_weekday_occurrences(weekday: i32, start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }

    let target = weekday.rem_euclid(7) as u32;
    let current_weekday = start.weekday().num_days_from_sunday();
    let offset = (target + 7 - current_weekday) % 7;

    let first = start + chrono::Duration::days(offset as i64);
    if first > end {
        return 0;
    }

    ((end - first).num_days() / 7 + 1) as u32
}

/// 缺勤归属的学期：上半年算上学期，下半年算下学期
fn semester_of_absence(date: NaiveDate) -> Semester {
    if date.month() <= 6 {
        Semester::First
    } else {
        Semester::Second
    }
}

/// 某科目某学期的应到课时数：该班级课表里所有匹配课时的
/// weekday 在学期窗口内出现次数之和
pub fn expected_lessons(
    lessons: &[WeeklyLesson],
    subject_id: i64,
    semester: Semester,
    school_year: i32,
) -> u32 {
    let (start, end) = semester_window(school_year, semester);
    lessons
        .iter()
        .filter(|l| l.subject_id == subject_id && l.semester == semester)
        .map(|l| count_weekday_occurrences(l.weekday, start, end))
        .sum()
}

/// 某槽位的标记：未安排活动 → `*`，安排了但没有成绩 → `-`，否则数值
fn slot_mark(
    activities: &[&Activity],
    scores: &[ActivityScore],
    slot: ActivitySlot,
) -> SlotMark {
    let activity = match activities.iter().find(|a| a.slot == slot) {
        Some(activity) => activity,
        None => return SlotMark::NotScheduled,
    };

    match scores
        .iter()
        .find(|s| s.activity_id == activity.id)
        .and_then(|s| s.value)
    {
        Some(value) => SlotMark::Score(value),
        None => SlotMark::Ungraded,
    }
}

/// 单科目单学期的小结
pub fn semester_summary(
    subject_activities: &[&Activity],
    scores: &[ActivityScore],
    absences: &[Attendance],
    subject_id: i64,
    semester: Semester,
    expected: u32,
) -> SemesterSummary {
    let semester_activities: Vec<&Activity> = subject_activities
        .iter()
        .copied()
        .filter(|a| a.semester == semester)
        .collect();

    let pv1 = slot_mark(&semester_activities, scores, ActivitySlot::Pv1);
    let pv2 = slot_mark(&semester_activities, scores, ActivitySlot::Pv2);
    let pv3 = slot_mark(&semester_activities, scores, ActivitySlot::Pv3);
    let tb1 = slot_mark(&semester_activities, scores, ActivitySlot::Tb1);
    let tb2 = slot_mark(&semester_activities, scores, ActivitySlot::Tb2);

    // 考试均分权重 3、作业均分权重 2；两边都至少有一个成绩才计算
    let exams: Vec<f64> = [pv1, pv2, pv3].iter().filter_map(|m| m.value()).collect();
    let assignments: Vec<f64> = [tb1, tb2].iter().filter_map(|m| m.value()).collect();

    let average = if !exams.is_empty() && !assignments.is_empty() {
        let exam_mean = exams.iter().sum::<f64>() / exams.len() as f64;
        let assignment_mean = assignments.iter().sum::<f64>() / assignments.len() as f64;
        Some(round1((exam_mean * 3.0 + assignment_mean * 2.0) / 5.0))
    } else {
        None
    };

    let absence_count = absences
        .iter()
        .filter(|a| a.subject_id == subject_id && semester_of_absence(a.date) == semester)
        .count();

    let attendance = if expected > 0 {
        let per_absence = 100.0 / expected as f64;
        round1((100.0 - absence_count as f64 * per_absence).max(0.0))
    } else {
        100.0
    };

    SemesterSummary {
        pv1,
        pv2,
        pv3,
        tb1,
        tb2,
        attendance,
        average,
    }
}

/// 组装整张成绩单
pub fn build_report(
    class: &SchoolClass,
    subjects: &[Subject],
    activities: &[Activity],
    scores: &[ActivityScore],
    absences: &[Attendance],
    lessons: &[WeeklyLesson],
) -> ReportCardResponse {
    let report = subjects
        .iter()
        .map(|subject| {
            let subject_activities: Vec<&Activity> = activities
                .iter()
                .filter(|a| a.subject_id == subject.id)
                .collect();

            let semester1 = semester_summary(
                &subject_activities,
                scores,
                absences,
                subject.id,
                Semester::First,
                expected_lessons(lessons, subject.id, Semester::First, class.school_year),
            );
            let semester2 = semester_summary(
                &subject_activities,
                scores,
                absences,
                subject.id,
                Semester::Second,
                expected_lessons(lessons, subject.id, Semester::Second, class.school_year),
            );

            let final_average = match (semester1.average, semester2.average) {
                (Some(s1), Some(s2)) => Some(round1((s1 + s2) / 2.0)),
                _ => None,
            };

            let situation = match final_average {
                Some(avg) if avg >= 7.0 => SubjectSituation::Approved,
                Some(_) => SubjectSituation::Failed,
                None => SubjectSituation::InProgress,
            };

            SubjectReportRow {
                subject_id: subject.id,
                subject_name: subject.name.clone(),
                semester1,
                semester2,
                final_average,
                situation,
            }
        })
        .collect();

    ReportCardResponse {
        class: Some(ClassSummary::from(class)),
        subjects: subjects
            .iter()
            .map(|s| SubjectHeader {
                id: s.id,
                name: s.name.clone(),
            })
            .collect(),
        report,
    }
}

/// 解析要出成绩单的班级
///
/// 指定 class_id 时校验学生确实在该班级；否则取指定学年（默认当前学年）
/// 的在读班级。
async fn resolve_class(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    student_id: i64,
    query: &ReportCardQuery,
) -> Result<Option<SchoolClass>, HttpResponse> {
    if let Some(class_id) = query.class_id {
        let class = storage
            .get_class_by_id(class_id)
            .await
            .map_err(|e| respond::internal("Failed to get class", e))?;

        let class = match class {
            Some(class) => class,
            None => {
                return Err(respond::not_found(
                    ErrorCode::ClassNotFound,
                    "Class not found or student is not enrolled in it",
                ));
            }
        };

        let roster = storage
            .student_ids_of_class(class.id)
            .await
            .map_err(|e| respond::internal("Failed to load class roster", e))?;
        if !roster.contains(&student_id) {
            return Err(respond::not_found(
                ErrorCode::ClassNotFound,
                "Class not found or student is not enrolled in it",
            ));
        }

        return Ok(Some(class));
    }

    let year = query.school_year.unwrap_or_else(current_school_year);
    storage
        .active_class_of_student(student_id, year)
        .await
        .map_err(|e| respond::internal("Failed to resolve class", e))
}

async fn load_and_build(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    student_id: i64,
    class: SchoolClass,
) -> Result<ReportCardResponse, HttpResponse> {
    let subject_ids = storage
        .subject_ids_of_class(class.id)
        .await
        .map_err(|e| respond::internal("Failed to load class subjects", e))?;
    if subject_ids.is_empty() {
        return Ok(ReportCardResponse {
            class: Some(ClassSummary::from(&class)),
            subjects: Vec::new(),
            report: Vec::new(),
        });
    }

    let subjects = storage
        .subjects_by_ids(&subject_ids)
        .await
        .map_err(|e| respond::internal("Failed to load subjects", e))?;

    let activities = storage
        .activities_of_class(class.id)
        .await
        .map_err(|e| respond::internal("Failed to load activities", e))?;

    let scores = storage
        .scores_of_student_in_class(student_id, class.id)
        .await
        .map_err(|e| respond::internal("Failed to load scores", e))?;

    let absences = storage
        .list_attendances(
            None,
            Some(student_id),
            &crate::models::attendance::requests::AttendanceListQuery {
                class_id: Some(class.id),
                ..Default::default()
            },
            Some(false),
        )
        .await
        .map_err(|e| respond::internal("Failed to load absences", e))?;

    let lessons = storage
        .active_lessons_of_class(class.id)
        .await
        .map_err(|e| respond::internal("Failed to load weekly lessons", e))?;

    Ok(build_report(
        &class, &subjects, &activities, &scores, &absences, &lessons,
    ))
}

pub async fn my_report_card(
    service: &StudentService,
    request: &HttpRequest,
    query: ReportCardQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match current_student(&storage, request).await {
        Ok(student) => student,
        Err(response) => return Ok(response),
    };

    let class = match resolve_class(&storage, student.id, &query).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(respond::ok(
                ReportCardResponse::empty(),
                "Report card retrieved",
            ));
        }
        Err(response) => return Ok(response),
    };

    match load_and_build(&storage, student.id, class).await {
        Ok(report) => Ok(respond::ok(report, "Report card retrieved")),
        Err(response) => Ok(response),
    }
}

pub async fn report_card_of_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    query: ReportCardQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(respond::not_found(
                ErrorCode::StudentNotFound,
                "Student not found",
            ));
        }
        Err(e) => return Ok(respond::internal("Failed to get student", e)),
    };

    let class = match resolve_class(&storage, student.id, &query).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(respond::ok(
                ReportCardResponse::empty(),
                "Report card retrieved",
            ));
        }
        Err(response) => return Ok(response),
    };

    // 教师只能查看自己有课的班级
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher) {
        let teacher = match current_teacher(&storage, request).await {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        let class_ids = match storage.class_ids_with_active_lessons(teacher.id).await {
            Ok(ids) => ids,
            Err(e) => return Ok(respond::internal("Failed to check teacher classes", e)),
        };
        if !class_ids.contains(&class.id) {
            return Ok(respond::forbidden(
                ErrorCode::ClassPermissionDenied,
                "You do not have permission to view this student's report card",
            ));
        }
    }

    match load_and_build(&storage, student.id, class).await {
        Ok(report) => Ok(respond::ok(report, "Report card retrieved")),
        Err(response) => Ok(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::entities::{ActivityKind, ActivityStatus};
    use crate::models::activity_scores::entities::ScoreStatus;
    use crate::models::classes::entities::{ClassShift, ClassStatus, EducationLevel};
    use crate::models::subjects::entities::SubjectStatus;
    use crate::models::weekly_lessons::entities::LessonStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn activity(id: i64, slot: ActivitySlot, semester: Semester) -> Activity {
        Activity {
            id,
            name: format!("activity {id}"),
            kind: if slot.is_exam_slot() {
                ActivityKind::Exam
            } else {
                ActivityKind::Assignment
            },
            slot,
            date: date(2026, 3, 10),
            start_time: "08:00".into(),
            end_time: "09:00".into(),
            teacher_id: 1,
            subject_id: 10,
            class_id: 100,
            semester,
            status: ActivityStatus::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn score(activity_id: i64, value: Option<f64>) -> ActivityScore {
        ActivityScore {
            id: activity_id * 100,
            value,
            student_id: 1,
            teacher_id: 1,
            subject_id: 10,
            class_id: 100,
            activity_id,
            period: "2026/1".into(),
            status: ScoreStatus::Present,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn absence(subject_id: i64, on: NaiveDate) -> Attendance {
        Attendance {
            id: 1,
            student_id: 1,
            teacher_id: 1,
            class_id: 100,
            subject_id,
            date: on,
            present: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn lesson(subject_id: i64, weekday: i32, semester: Semester) -> WeeklyLesson {
        WeeklyLesson {
            id: 1,
            weekday,
            start_time: "08:00".into(),
            end_time: "09:00".into(),
            class_id: 100,
            subject_id,
            teacher_id: 1,
            semester,
            status: LessonStatus::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn subject(id: i64, name: &str) -> Subject {
        Subject {
            id,
            name: name.into(),
            description: None,
            status: SubjectStatus::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn class(year: i32) -> SchoolClass {
        SchoolClass {
            id: 100,
            name: "5A".into(),
            school_year: year,
            shift: ClassShift::Morning,
            education_level: EducationLevel::Elementary,
            status: ClassStatus::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_count_weekday_occurrences() {
        // 2026-02-01 是周日；2 月有 4 个周一（2、9、16、23）
        assert_eq!(
            count_weekday_occurrences(1, date(2026, 2, 1), date(2026, 2, 28)),
            4
        );
        // 周日：1、8、15、22
        assert_eq!(
            count_weekday_occurrences(0, date(2026, 2, 1), date(2026, 2, 28)),
            4
        );
        // 单日窗口
        assert_eq!(
            count_weekday_occurrences(0, date(2026, 2, 1), date(2026, 2, 1)),
            1
        );
        assert_eq!(
            count_weekday_occurrences(1, date(2026, 2, 1), date(2026, 2, 1)),
            0
        );
        // 空窗口
        assert_eq!(
            count_weekday_occurrences(1, date(2026, 2, 2), date(2026, 2, 1)),
            0
        );
    }

    #[test]
    fn test_semester_window() {
        let (start, end) = semester_window(2026, Semester::First);
        assert_eq!(start, date(2026, 2, 1));
        assert_eq!(end, date(2026, 6, 30));
        let (start, end) = semester_window(2026, Semester::Second);
        assert_eq!(start, date(2026, 8, 1));
        assert_eq!(end, date(2026, 11, 30));
    }

    #[test]
    fn test_semester_average_weighting() {
        // 考试 8.0/6.0，作业 10.0 → (7.0*3 + 10.0*2)/5 = 8.2
        let a1 = activity(1, ActivitySlot::Pv1, Semester::First);
        let a2 = activity(2, ActivitySlot::Pv2, Semester::First);
        let a3 = activity(3, ActivitySlot::Tb1, Semester::First);
        let activities: Vec<&Activity> = vec![&a1, &a2, &a3];
        let scores = vec![
            score(1, Some(8.0)),
            score(2, Some(6.0)),
            score(3, Some(10.0)),
        ];

        let summary = semester_summary(&activities, &scores, &[], 10, Semester::First, 0);
        assert_eq!(summary.average, Some(8.2));
        assert_eq!(summary.pv1, SlotMark::Score(8.0));
        assert_eq!(summary.pv3, SlotMark::NotScheduled);
        assert_eq!(summary.tb2, SlotMark::NotScheduled);
    }

    #[test]
    fn test_semester_average_requires_both_kinds() {
        // 只有考试成绩时不出均分
        let a1 = activity(1, ActivitySlot::Pv1, Semester::First);
        let activities: Vec<&Activity> = vec![&a1];
        let scores = vec![score(1, Some(9.0))];

        let summary = semester_summary(&activities, &scores, &[], 10, Semester::First, 0);
        assert_eq!(summary.average, None);
    }

    #[test]
    fn test_ungraded_slot_mark() {
        let a1 = activity(1, ActivitySlot::Pv1, Semester::First);
        let activities: Vec<&Activity> = vec![&a1];
        let scores = vec![score(1, None)];

        let summary = semester_summary(&activities, &scores, &[], 10, Semester::First, 0);
        assert_eq!(summary.pv1, SlotMark::Ungraded);
    }

    #[test]
    fn test_attendance_percentage() {
        // 每周一上课，上学期窗口 2026-02-01..06-30 有 22 个周一
        let lessons = vec![lesson(10, 1, Semester::First)];
        let expected = expected_lessons(&lessons, 10, Semester::First, 2026);
        assert_eq!(expected, 22);

        let absences = vec![
            absence(10, date(2026, 3, 2)),
            absence(10, date(2026, 3, 9)),
            // 下学期的缺勤不计入上学期
            absence(10, date(2026, 9, 7)),
            // 其它科目的缺勤不计入
            absence(11, date(2026, 3, 2)),
        ];

        let summary = semester_summary(&[], &[], &absences, 10, Semester::First, expected);
        // 100 - 2 * (100/22) = 90.90... → 90.9
        assert_eq!(summary.attendance, 90.9);
    }

    #[test]
    fn test_attendance_without_expected_lessons() {
        let summary = semester_summary(&[], &[], &[], 10, Semester::First, 0);
        assert_eq!(summary.attendance, 100.0);
    }

    #[test]
    fn test_attendance_floors_at_zero() {
        let absences: Vec<Attendance> = (0..30)
            .map(|i| absence(10, date(2026, 3, 1) + chrono::Duration::days(i)))
            .collect();
        let summary = semester_summary(&[], &[], &absences, 10, Semester::First, 10);
        assert_eq!(summary.attendance, 0.0);
    }

    #[test]
    fn test_full_report_final_average_and_situation() {
        let subjects = vec![subject(10, "Mathematics")];
        let activities = vec![
            activity(1, ActivitySlot::Pv1, Semester::First),
            activity(2, ActivitySlot::Tb1, Semester::First),
            activity(3, ActivitySlot::Pv1, Semester::Second),
            activity(4, ActivitySlot::Tb1, Semester::Second),
        ];
        // S1: (8*3 + 8*2)/5 = 8.0; S2: (6*3 + 6*2)/5 = 6.0 → final 7.0 → approved
        let scores = vec![
            score(1, Some(8.0)),
            score(2, Some(8.0)),
            score(3, Some(6.0)),
            score(4, Some(6.0)),
        ];

        let report = build_report(&class(2026), &subjects, &activities, &scores, &[], &[]);
        let row = &report.report[0];
        assert_eq!(row.semester1.average, Some(8.0));
        assert_eq!(row.semester2.average, Some(6.0));
        assert_eq!(row.final_average, Some(7.0));
        assert_eq!(row.situation, SubjectSituation::Approved);
    }

    #[test]
    fn test_report_in_progress_without_second_semester() {
        let subjects = vec![subject(10, "History")];
        let activities = vec![
            activity(1, ActivitySlot::Pv1, Semester::First),
            activity(2, ActivitySlot::Tb1, Semester::First),
        ];
        let scores = vec![score(1, Some(5.0)), score(2, Some(5.0))];

        let report = build_report(&class(2026), &subjects, &activities, &scores, &[], &[]);
        let row = &report.report[0];
        assert_eq!(row.final_average, None);
        assert_eq!(row.situation, SubjectSituation::InProgress);
    }
}
