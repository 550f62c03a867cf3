use crate::error::{Result, StreaksError};
use crate::model::{Commit, DateRange};
use std::collections::HashSet;
use std::io::Read;
use tracing::{debug, warn};

/// Reads commit records from either a JSON array or NDJSON (one record per
/// line, blank lines ignored).
pub fn read_commits<R: Read>(mut reader: R) -> Result<Vec<Commit>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    if content.trim_start().starts_with('[') {
        let commits: Vec<Commit> = serde_json::from_str(&content)?;
        debug!(commits = commits.len(), "read JSON commit array");
        return Ok(commits);
    }

    let mut commits = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let commit = serde_json::from_str(line)
            .map_err(|e| StreaksError::Parse(format!("line {}: {e}", idx + 1)))?;
        commits.push(commit);
    }
    debug!(commits = commits.len(), "read NDJSON commits");
    Ok(commits)
}

/// Drops every commit whose SHA was already seen, keeping the first occurrence.
pub fn dedup_by_sha(commits: Vec<Commit>) -> Vec<Commit> {
    let total = commits.len();
    let mut seen = HashSet::new();
    let unique: Vec<Commit> = commits
        .into_iter()
        .filter(|c| seen.insert(c.sha.clone()))
        .collect();
    if unique.len() != total {
        warn!(duplicates = total - unique.len(), "dropped duplicate commits");
    }
    unique
}

pub fn filter_range(commits: Vec<Commit>, range: &DateRange) -> Vec<Commit> {
    commits
        .into_iter()
        .filter(|c| range.contains(&c.author_date))
        .collect()
}
