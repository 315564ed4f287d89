pub mod extractor;
pub mod file_magic;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod time;
pub mod validate;

pub use extractor::{
    SafeActivityIdI64, SafeAttendanceIdI64, SafeChapterIndex, SafeClassIdI64, SafeCourseIdI64,
    SafeGuardianIdI64, SafeIdI64, SafeLessonIdI64, SafePublicId, SafeReportCardIdI64,
    SafeScoreIdI64, SafeStudentIdI64, SafeSubjectIdI64, SafeTeacherIdI64, SafeUserIdI64,
};
pub use file_magic::validate_magic_bytes;
pub use parameter_error_handler::{json_error_handler, query_error_handler};
pub use sql::escape_like_pattern;
pub use time::{intervals_overlap, parse_hhmm};
