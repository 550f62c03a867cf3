pub mod day;
pub mod repo;

pub use day::day_groups;
pub use repo::repo_groups;

use crate::model::Commit;
use std::cmp::Ordering;

/// Newest first. Used with stable sorts so equal author dates keep input order.
pub(crate) fn newest_first(a: &Commit, b: &Commit) -> Ordering {
    b.author_date.cmp(&a.author_date)
}
