//! "HH:MM" 时刻处理
//!
//! 课程表与活动的起止时刻都以补零的 "HH:MM" 字符串存储，
//! 字典序比较与数值比较等价。

/// 解析 "HH:MM" 为从零点起的分钟数
pub fn parse_hhmm(raw: &str) -> Option<u32> {
    let (hour, minute) = raw.split_once(':')?;
    if hour.len() != 2 || minute.len() != 2 {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// 校验 "HH:MM" 格式
pub fn validate_hhmm(raw: &str) -> Result<(), &'static str> {
    parse_hhmm(raw).map(|_| ()).ok_or("Time must be in HH:MM format")
}

/// 两个半开区间 [a_start, a_end) 与 [b_start, b_end) 是否重叠
pub fn intervals_overlap(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> bool {
    match (
        parse_hhmm(a_start),
        parse_hhmm(a_end),
        parse_hhmm(b_start),
        parse_hhmm(b_end),
    ) {
        (Some(a0), Some(a1), Some(b0), Some(b1)) => a0 < b1 && a1 > b0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("08:30"), Some(510));
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("8:30"), None);
        assert_eq!(parse_hhmm("0830"), None);
    }

    #[test]
    fn test_overlap() {
        // 相邻不算重叠
        assert!(!intervals_overlap("08:00", "09:00", "09:00", "10:00"));
        assert!(intervals_overlap("08:00", "09:30", "09:00", "10:00"));
        assert!(intervals_overlap("08:00", "12:00", "09:00", "10:00"));
        assert!(!intervals_overlap("08:00", "09:00", "10:00", "11:00"));
    }

    #[test]
    fn test_overlap_invalid_input() {
        assert!(!intervals_overlap("bogus", "09:00", "08:00", "10:00"));
    }
}
