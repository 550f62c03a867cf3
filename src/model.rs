use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// A single authored change, as handed over by whatever fetched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub author_date: DateTime<Utc>,
    pub repo_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
}

impl Commit {
    /// Abbreviated SHA for display. SHAs shorter than 8 characters come back whole.
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(8) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }

    /// First line of the commit message.
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Commits from one repository, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoGroup {
    pub repo_name: String,
    pub additions: u64,
    pub deletions: u64,
    pub commits: Vec<Commit>,
}

impl RepoGroup {
    pub fn new(repo_name: String) -> Self {
        Self {
            repo_name,
            additions: 0,
            deletions: 0,
            commits: Vec::new(),
        }
    }

    pub fn add_commit(&mut self, commit: Commit) {
        self.additions += commit.additions as u64;
        self.deletions += commit.deletions as u64;
        self.commits.push(commit);
    }

    pub fn latest(&self) -> Option<&DateTime<Utc>> {
        self.commits.first().map(|c| &c.author_date)
    }
}

/// Commits whose author date falls on one local calendar day, newest first.
///
/// `day` is local midnight in the zone the bucket was built for. It only equals
/// UTC midnight when that zone is UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<Tz: TimeZone> {
    pub day: DateTime<Tz>,
    pub additions: u64,
    pub deletions: u64,
    pub commits: Vec<Commit>,
}

impl<Tz: TimeZone> DayBucket<Tz> {
    pub fn new(day: DateTime<Tz>) -> Self {
        Self {
            day,
            additions: 0,
            deletions: 0,
            commits: Vec::new(),
        }
    }

    pub fn add_commit(&mut self, commit: Commit) {
        self.additions += commit.additions as u64;
        self.deletions += commit.deletions as u64;
        self.commits.push(commit);
    }
}

/// Commit count for one local day of the streak window. A score of 0 is a day
/// without activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityStat<Tz: TimeZone> {
    pub day: DateTime<Tz>,
    pub score: u32,
}

impl<Tz: TimeZone> ActivityStat<Tz> {
    pub fn new(day: DateTime<Tz>) -> Self {
        Self { day, score: 0 }
    }

    /// Calendar date of the stat in its own zone, `YYYY-MM-DD`.
    pub fn iso_date(&self) -> String {
        self.day.date_naive().format("%Y-%m-%d").to_string()
    }
}

/// Half-open window over author dates: `since` inclusive, `until` exclusive.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Half-open: `since` is inclusive, `until` is exclusive, so a range ending at
    /// local midnight never picks up commits from the next day.
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp >= &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitEntry {
    pub sha: String,
    pub short_sha: String,
    pub title: String,
    pub author_date: DateTime<Utc>,
    pub additions: u32,
    pub deletions: u32,
}

impl From<&Commit> for CommitEntry {
    fn from(commit: &Commit) -> Self {
        Self {
            sha: commit.sha.clone(),
            short_sha: commit.short_sha().to_string(),
            title: commit.title().to_string(),
            author_date: commit.author_date,
            additions: commit.additions,
            deletions: commit.deletions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoEntry {
    pub repo_name: String,
    pub additions: u64,
    pub deletions: u64,
    pub commit_count: usize,
    pub commits: Vec<CommitEntry>,
}

impl From<&RepoGroup> for RepoEntry {
    fn from(group: &RepoGroup) -> Self {
        Self {
            repo_name: group.repo_name.clone(),
            additions: group.additions,
            deletions: group.deletions,
            commit_count: group.commits.len(),
            commits: group.commits.iter().map(CommitEntry::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    /// Local midnight as RFC3339, carrying the zone offset.
    pub day: String,
    pub date: String,
    pub additions: u64,
    pub deletions: u64,
    pub commit_count: usize,
    pub commits: Vec<CommitEntry>,
}

impl<Tz: TimeZone> From<&DayBucket<Tz>> for DayEntry {
    fn from(bucket: &DayBucket<Tz>) -> Self {
        Self {
            day: bucket.day.fixed_offset().to_rfc3339(),
            date: bucket.day.date_naive().format("%Y-%m-%d").to_string(),
            additions: bucket.additions,
            deletions: bucket.deletions,
            commit_count: bucket.commits.len(),
            commits: bucket.commits.iter().map(CommitEntry::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReposOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub entries: Vec<RepoEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaysOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub time_zone: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub entries: Vec<DayEntry>,
}
