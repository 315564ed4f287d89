pub use super::activities::Entity as Activities;
pub use super::activity_scores::Entity as ActivityScores;
pub use super::attendances::Entity as Attendances;
pub use super::class_students::Entity as ClassStudents;
pub use super::class_subjects::Entity as ClassSubjects;
pub use super::class_teachers::Entity as ClassTeachers;
pub use super::classes::Entity as Classes;
pub use super::course_classes::Entity as CourseClasses;
pub use super::course_enrollments::Entity as CourseEnrollments;
pub use super::course_progress::Entity as CourseProgress;
pub use super::courses::Entity as Courses;
pub use super::guardians::Entity as Guardians;
pub use super::report_cards::Entity as ReportCards;
pub use super::student_guardians::Entity as StudentGuardians;
pub use super::students::Entity as Students;
pub use super::subjects::Entity as Subjects;
pub use super::teacher_subjects::Entity as TeacherSubjects;
pub use super::teachers::Entity as Teachers;
pub use super::users::Entity as Users;
pub use super::weekly_lessons::Entity as WeeklyLessons;
