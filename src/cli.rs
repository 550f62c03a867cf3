use crate::error::StreaksError;
use crate::ingest::{dedup_by_sha, filter_range, read_commits};
use crate::model::{Commit, DateRange};
use crate::util::{parse_instant, parse_zone};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "streaks")]
#[command(about = "Commit activity by repository and by day, with a contribution streak graphic")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Commit records as a JSON array or NDJSON (`-` or omitted: stdin)")]
    pub input: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "STREAKS_TZ",
        help = "Time zone for day boundaries: UTC or a fixed offset like +05:30"
    )]
    pub tz: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Only commits at or after this point (RFC3339, YYYY-MM-DD in --tz or UTC, or a duration like 90d)"
    )]
    pub since: Option<String>,

    #[arg(long, global = true, help = "Only commits before this point (RFC3339, YYYY-MM-DD, or a duration like 7d)")]
    pub until: Option<String>,

    #[arg(long, short, global = true, help = "Log progress to stderr")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Commits grouped by repository, most recently active first
    Repos {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Commits grouped by local calendar day, most recent first
    Days {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Contribution streak graphic for the last 40 days of the window, as SVG
    Streak {
        #[arg(long, short, help = "Write the SVG here instead of stdout")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Repos { json, ndjson } => crate::repos::exec(self.common, json, ndjson),
            Commands::Days { json, ndjson } => crate::days::exec(self.common, json, ndjson),
            Commands::Streak { output } => crate::streak::exec::exec(self.common, output),
        }
    }
}

impl CommonArgs {
    /// The zone day boundaries are computed in. Commands that bucket by day call
    /// this and fail when no zone was given.
    pub fn zone(&self) -> Result<FixedOffset> {
        let tz = self.tz.as_deref().ok_or_else(|| {
            StreaksError::InvalidZone("a time zone is required for day boundaries (--tz or STREAKS_TZ)".to_string())
        })?;
        Ok(parse_zone(tz)?)
    }

    /// Resolves `--since`/`--until`. Bare dates are local midnight in `tz`.
    pub fn range<Tz: TimeZone>(&self, tz: &Tz, now: DateTime<Utc>) -> Result<DateRange> {
        let mut range = DateRange::new();
        if let Some(since) = self.since.as_deref() {
            range = range.with_since(parse_instant(since, tz, now).context("Failed to parse --since")?);
        }
        if let Some(until) = self.until.as_deref() {
            range = range.with_until(parse_instant(until, tz, now).context("Failed to parse --until")?);
        }
        if let (Some(since), Some(until)) = (range.since, range.until) {
            if since > until {
                return Err(StreaksError::InvalidRange(format!(
                    "since ({since}) is after until ({until})"
                ))
                .into());
            }
        }
        Ok(range)
    }

    /// Reads, deduplicates and range-filters the commit records.
    pub fn load_commits(&self, range: &DateRange) -> Result<Vec<Commit>> {
        let commits = match self.input.as_deref() {
            Some(path) if path.as_os_str() != "-" => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                read_commits(file)
            }
            _ => read_commits(std::io::stdin().lock()),
        }
        .context("Failed to read commit records")?;

        let read = commits.len();
        let commits = filter_range(dedup_by_sha(commits), range);
        info!(read, kept = commits.len(), "loaded commits");
        Ok(commits)
    }
}
