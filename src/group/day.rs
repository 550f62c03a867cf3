use super::newest_first;
use crate::model::{Commit, DayBucket};
use crate::util::start_of_day;
use chrono::TimeZone;
use tracing::debug;

/// Groups commits by local calendar day in `tz`, most recent day first.
///
/// All commits are sorted newest first, then appended to the current bucket
/// until the local day changes. Days without commits are not represented.
pub fn day_groups<Tz: TimeZone>(commits: &[Commit], tz: &Tz) -> Vec<DayBucket<Tz>> {
    let mut sorted = commits.to_vec();
    sorted.sort_by(newest_first);

    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut buckets = Vec::new();
    let mut current = DayBucket::new(start_of_day(&first.author_date, tz));
    current.add_commit(first);

    for commit in iter {
        let day = start_of_day(&commit.author_date, tz);
        if day < current.day {
            buckets.push(std::mem::replace(&mut current, DayBucket::new(day)));
        }
        current.add_commit(commit);
    }
    buckets.push(current);

    debug!(commits = commits.len(), days = buckets.len(), "grouped commits by day");
    buckets
}
