use super::newest_first;
use crate::model::{Commit, RepoGroup};
use std::collections::HashMap;
use tracing::debug;

/// Groups commits by repository, most recently active repository first.
///
/// Commits inside a group are newest first. Groups whose newest commits share
/// an author date fall back to repository name order.
pub fn repo_groups(commits: &[Commit]) -> Vec<RepoGroup> {
    let mut map: HashMap<&str, RepoGroup> = HashMap::new();
    for commit in commits {
        map.entry(commit.repo_name.as_str())
            .or_insert_with(|| RepoGroup::new(commit.repo_name.clone()))
            .add_commit(commit.clone());
    }

    let mut groups: Vec<RepoGroup> = map
        .into_values()
        .map(|mut group| {
            group.commits.sort_by(newest_first);
            group
        })
        .collect();

    groups.sort_by(|a, b| {
        b.latest()
            .cmp(&a.latest())
            .then_with(|| a.repo_name.cmp(&b.repo_name))
    });

    debug!(commits = commits.len(), repos = groups.len(), "grouped commits by repository");
    groups
}
