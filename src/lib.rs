//! Commit activity views: commits grouped by repository, commits bucketed by
//! local calendar day, and the contribution streak heat-map built from those days.

pub mod cli;
pub mod days;
pub mod error;
pub mod group;
pub mod ingest;
pub mod model;
pub mod repos;
pub mod streak;
pub mod util;

pub use error::{Result, StreaksError};
pub use group::{day_groups, repo_groups};
pub use model::{ActivityStat, Commit, DayBucket, RepoGroup};
pub use streak::{activity_stats, quartile_boundaries, streak_svg, Matrix, Palette, QuartileBoundaries};
pub use util::start_of_day;
