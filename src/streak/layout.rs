use crate::model::{ActivityStat, DayBucket};
use crate::util::local_midnight;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::debug;

/// Longest window the streak graphic covers.
pub const MAX_WINDOW_DAYS: i64 = 40;
pub const DAYS_PER_WEEK: usize = 7;

/// One stat per local day in `[start, end)`, oldest first, scored from `buckets`.
///
/// Windows longer than [`MAX_WINDOW_DAYS`] keep only the most recent days before
/// `end`. `buckets` must be newest first, as produced by
/// [`day_groups`](crate::group::day_groups) with the same `tz`.
///
/// # Panics
///
/// Panics if `start` is after `end`.
pub fn activity_stats<Tz: TimeZone>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: &Tz,
    buckets: &[DayBucket<Tz>],
) -> Vec<ActivityStat<Tz>> {
    assert!(start <= end, "start ({start}) must not be after end ({end})");

    let end_date = end.with_timezone(tz).date_naive();
    let mut first_date = start.with_timezone(tz).date_naive();
    if end_date.signed_duration_since(first_date).num_days() > MAX_WINDOW_DAYS {
        first_date = end_date - Duration::days(MAX_WINDOW_DAYS);
    }
    let len = end_date.signed_duration_since(first_date).num_days().max(0) as usize;

    let mut stats: Vec<ActivityStat<Tz>> = first_date
        .iter_days()
        .take(len)
        .map(|date| ActivityStat::new(local_midnight(date, tz)))
        .collect();

    // Single backward merge; buckets past the window never match a stat.
    let mut pending = buckets
        .iter()
        .skip_while(|bucket| bucket.day.with_timezone(tz).date_naive() >= end_date)
        .peekable();
    for stat in stats.iter_mut().rev() {
        if let Some(bucket) = pending.peek() {
            if bucket.day == stat.day {
                stat.score = bucket.commits.len() as u32;
                pending.next();
            }
        }
    }

    debug!(days = stats.len(), from = %first_date, to = %end_date, "built activity window");
    stats
}

/// Day stats folded into a weekday-by-week grid.
///
/// `rows()[r][c]` is the `r`-th day of the `c`-th seven-day chunk, so weeks run
/// left to right as columns. When the day count is not a multiple of seven the
/// trailing rows are one column short.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<Tz: TimeZone> {
    rows: Vec<Vec<ActivityStat<Tz>>>,
}

impl<Tz: TimeZone> Matrix<Tz> {
    pub fn fold(stats: &[ActivityStat<Tz>]) -> Self {
        let mut rows: Vec<Vec<ActivityStat<Tz>>> = Vec::new();
        for week in stats.chunks(DAYS_PER_WEEK) {
            for (row, stat) in week.iter().enumerate() {
                if rows.len() <= row {
                    rows.push(Vec::new());
                }
                rows[row].push(stat.clone());
            }
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<ActivityStat<Tz>>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every cell as `(column, row, stat)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &ActivityStat<Tz>)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| cells.iter().enumerate().map(move |(col, stat)| (col, row, stat)))
    }
}
