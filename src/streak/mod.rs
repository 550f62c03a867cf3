pub mod exec;
pub mod layout;
pub mod quartile;
pub mod render;

pub use layout::{activity_stats, Matrix, DAYS_PER_WEEK, MAX_WINDOW_DAYS};
pub use quartile::{quartile_boundaries, Palette, QuartileBoundaries, DEFAULT_COLORS};
pub use render::{canvas_size, rects, write_svg, Rect};

use crate::error::Result;
use crate::group::day_groups;
use crate::model::Commit;
use chrono::{DateTime, TimeZone, Utc};
use std::io::Write;
use tracing::info;

/// Renders the streak graphic for `commits` over `[start, end)` in `tz`.
///
/// # Panics
///
/// Panics if `start` is after `end`.
pub fn streak_svg<Tz: TimeZone, W: Write>(
    commits: &[Commit],
    tz: &Tz,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    palette: &Palette,
    out: &mut W,
) -> Result<()> {
    let buckets = day_groups(commits, tz);
    let stats = activity_stats(start, end, tz, &buckets);
    let matrix = Matrix::fold(&stats);
    let scores: Vec<u32> = stats.iter().map(|s| s.score).collect();

    info!(
        commits = commits.len(),
        days = stats.len(),
        columns = matrix.num_columns(),
        "rendering streak graphic"
    );
    write_svg(&matrix, &scores, palette, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    #[test]
    fn renders_commits_into_cells() {
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 8, 1, 3, 0, 0).unwrap();
        let commits: Vec<Commit> = (0..5)
            .map(|i| Commit {
                sha: format!("{i}"),
                author_date: end - Duration::hours(6 + i * 30),
                repo_name: "a/b".to_string(),
                message: String::new(),
                additions: 1,
                deletions: 1,
            })
            .collect();

        let mut out = Vec::new();
        streak_svg(&commits, &tz, end - Duration::days(90), end, &Palette::default(), &mut out).unwrap();
        let svg = String::from_utf8(out).unwrap();

        assert_eq!(svg.matches("<rect ").count(), 40);
        assert!(svg.contains(r#"data-date="2024-07-31""#));
        assert!(!svg.contains(r#"data-date="2024-08-01""#));
        let busy = svg.matches("data-count=\"1\"").count();
        assert_eq!(busy, 5);
    }
}
