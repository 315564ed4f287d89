use serde::{Deserialize, Serialize};

/// 业务错误码
///
/// 0 表示成功；1xxx 通用/认证；2xxx 用户与人员；3xxx 班级；4xxx 科目；
/// 5xxx 活动与成绩；6xxx 出勤；7xxx 课程表；8xxx 内容课程；9xxx 上传与媒体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1004,
    RateLimitExceeded = 1005,
    AuthFailed = 1100,
    AccountBlocked = 1101,

    UserNotFound = 2001,
    EmailAlreadyExists = 2002,
    CpfAlreadyExists = 2003,
    InvalidRole = 2004,
    StudentNotFound = 2101,
    TeacherNotFound = 2102,
    GuardianNotFound = 2103,
    GuardianRequired = 2104,
    GuardianLimitExceeded = 2105,
    PhoneAlreadyExists = 2106,

    ClassNotFound = 3001,
    ClassAlreadyExists = 3002,
    ClassPermissionDenied = 3003,
    StudentAlreadyEnrolled = 3004,

    SubjectNotFound = 4001,
    SubjectAlreadyExists = 4002,
    SubjectInUse = 4003,
    SubjectPermissionDenied = 4004,

    ActivityNotFound = 5001,
    ActivitySlotTaken = 5002,
    EmptyClassRoster = 5003,
    ScoreNotFound = 5004,
    InvalidScore = 5005,
    InvalidScoreStatus = 5006,
    ReportCardNotFound = 5007,
    ReportCardAlreadyExists = 5008,

    AttendanceNotFound = 6001,
    AttendancePermissionDenied = 6002,
    NoTeacherForSubject = 6003,

    LessonNotFound = 7001,
    LessonConflict = 7002,

    CourseNotFound = 8001,
    CourseInactive = 8002,
    AlreadyEnrolled = 8003,
    EnrollmentDenied = 8004,
    NotEnrolled = 8005,
    ProgressNotFound = 8006,
    CourseNotCompleted = 8007,
    LockedByAdmin = 8008,
    InvalidChapter = 8009,

    FileUploadFailed = 9001,
    FileTypeNotAllowed = 9002,
    FileSizeExceeded = 9003,
    FileNotFound = 9004,
    MultifileUploadNotAllowed = 9005,
    MediaDeleteFailed = 9006,
}
