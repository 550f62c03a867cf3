use crate::error::{Result, StreaksError};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

/// Start of the local calendar day containing `instant`, as seen from `tz`.
///
/// The result is an absolute instant. It is UTC midnight only when `tz` is UTC.
pub fn start_of_day<Tz: TimeZone, Src: TimeZone>(instant: &DateTime<Src>, tz: &Tz) -> DateTime<Tz> {
    local_midnight(instant.with_timezone(tz).date_naive(), tz)
}

/// Local midnight of `date` in `tz`.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight skipped by a
/// DST transition resolves to the first local time that exists on that date.
pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(dt) = tz.from_local_datetime(&midnight).earliest() {
        return dt;
    }
    (1..=96)
        .map(|quarter| midnight + Duration::minutes(15 * quarter))
        .find_map(|t| tz.from_local_datetime(&t).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Parses `UTC`, `Z`, or a fixed offset such as `+05:30` / `-08:00`.
pub fn parse_zone(input: &str) -> Result<FixedOffset> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(|| StreaksError::InvalidZone(input.to_string()));
    }
    trimmed
        .parse::<FixedOffset>()
        .map_err(|e| StreaksError::InvalidZone(format!("'{input}': {e}")))
}

/// Parses an RFC3339 instant, a `YYYY-MM-DD` date (local midnight in `tz`), or a
/// relative duration like `90d`, `2weeks` or `3days ago` counted back from `now`.
pub fn parse_instant<Tz: TimeZone>(input: &str, tz: &Tz, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(local_midnight(date, tz).with_timezone(&Utc));
    }

    let relative = input.strip_suffix("ago").unwrap_or(input).trim();
    let duration = humantime::parse_duration(relative)
        .map_err(|e| StreaksError::InvalidDate(format!("'{input}': {e}")))?;
    let duration = Duration::from_std(duration)
        .map_err(|_| StreaksError::InvalidDate(format!("Duration overflow for '{input}'")))?;
    now.checked_sub_signed(duration)
        .ok_or_else(|| StreaksError::InvalidDate(format!("Duration overflow for '{input}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{LocalResult, NaiveDateTime};
    use pretty_assertions::assert_eq;

    /// UTC-3 that springs forward to UTC-2 at local midnight on 2024-10-06, so
    /// 00:00..01:00 never happens that day.
    #[derive(Debug, Clone, Copy)]
    struct MidnightGap;

    impl MidnightGap {
        fn switch() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 10, 6).unwrap().and_hms_opt(3, 0, 0).unwrap()
        }
    }

    impl TimeZone for MidnightGap {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            MidnightGap
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let standard = *local + Duration::hours(3) < Self::switch();
            let summer = *local + Duration::hours(2) >= Self::switch();
            match (standard, summer) {
                (true, true) => LocalResult::Ambiguous(offset(-3), offset(-2)),
                (true, false) => LocalResult::Single(offset(-3)),
                (false, true) => LocalResult::Single(offset(-2)),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch() {
                offset(-3)
            } else {
                offset(-2)
            }
        }
    }

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[test]
    fn start_of_day_in_utc_is_utc_midnight() {
        let t = Utc.with_ymd_and_hms(2014, 3, 5, 16, 15, 15).unwrap();
        assert_eq!(start_of_day(&t, &Utc), Utc.with_ymd_and_hms(2014, 3, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn start_of_day_follows_the_local_date() {
        // 02:00 UTC is still the previous evening in UTC-5.
        let t = Utc.with_ymd_and_hms(2014, 3, 5, 2, 0, 0).unwrap();
        let tz = offset(-5);
        let day = start_of_day(&t, &tz);

        assert_eq!(day.date_naive(), NaiveDate::from_ymd_opt(2014, 3, 4).unwrap());
        assert_eq!(day.with_timezone(&Utc), Utc.with_ymd_and_hms(2014, 3, 4, 5, 0, 0).unwrap());
    }

    #[test]
    fn start_of_day_ahead_of_utc() {
        let t = Utc.with_ymd_and_hms(2014, 3, 5, 22, 30, 0).unwrap();
        let tz = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let day = start_of_day(&t, &tz);

        assert_eq!(day.date_naive(), NaiveDate::from_ymd_opt(2014, 3, 6).unwrap());
        assert_eq!(day.with_timezone(&Utc), Utc.with_ymd_and_hms(2014, 3, 5, 18, 30, 0).unwrap());
    }

    #[test]
    fn start_of_day_is_idempotent() {
        let t = Utc.with_ymd_and_hms(2020, 2, 29, 23, 59, 59).unwrap();
        let tz = offset(9);
        let once = start_of_day(&t, &tz);
        assert_eq!(start_of_day(&once, &tz), once);
    }

    #[test]
    fn skipped_midnight_starts_at_first_existing_time() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 6).unwrap();
        let day = local_midnight(date, &MidnightGap);

        assert_eq!(day.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 10, 6, 3, 0, 0).unwrap());
        assert_eq!(day.naive_local(), date.and_hms_opt(1, 0, 0).unwrap());

        let afternoon = Utc.with_ymd_and_hms(2024, 10, 6, 18, 0, 0).unwrap();
        assert_eq!(start_of_day(&afternoon, &MidnightGap), day);
    }

    #[test]
    fn ordinary_midnight_next_to_a_gap() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 5).unwrap();
        let day = local_midnight(date, &MidnightGap);
        assert_eq!(day.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 10, 5, 3, 0, 0).unwrap());
    }

    #[test]
    fn parse_zone_accepts_utc_and_offsets() {
        assert_eq!(parse_zone("UTC").unwrap(), offset(0));
        assert_eq!(parse_zone("z").unwrap(), offset(0));
        assert_eq!(parse_zone("+05:30").unwrap(), FixedOffset::east_opt(19800).unwrap());
        assert_eq!(parse_zone("-08:00").unwrap(), offset(-8));
    }

    #[test]
    fn parse_zone_rejects_names() {
        assert!(matches!(parse_zone("Mars/Olympus"), Err(StreaksError::InvalidZone(_))));
        assert!(parse_zone("").is_err());
    }

    #[test]
    fn parse_instant_formats() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let tz = offset(2);

        assert_eq!(
            parse_instant("2024-03-01T08:00:00Z", &tz, now).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
        );
        assert_eq!(
            parse_instant("2024-03-01", &tz, now).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 29, 22, 0, 0).unwrap()
        );
        assert_eq!(
            parse_instant("3days", &tz, now).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap()
        );
        assert_eq!(
            parse_instant("2weeks ago", &tz, now).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 25, 12, 0, 0).unwrap()
        );
        assert!(matches!(parse_instant("yesterday-ish", &tz, now), Err(StreaksError::InvalidDate(_))));
    }
}
