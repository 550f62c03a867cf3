use crate::cli::CommonArgs;
use crate::group::repo_groups;
use crate::model::{RepoEntry, RepoGroup, ReposOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::{FixedOffset, Utc};
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    // Repository grouping has no day boundaries; the zone only anchors bare dates.
    let tz = match common.tz {
        Some(_) => common.zone()?,
        None => FixedOffset::east_opt(0).context("UTC offset")?,
    };
    let range = common.range(&tz, Utc::now())?;
    let commits = common.load_commits(&range)?;

    let groups = repo_groups(&commits);

    if json {
        output_json(&groups, &common)?;
    } else if ndjson {
        output_ndjson(&groups)?;
    } else {
        output_table(&groups)?;
    }

    Ok(())
}

fn output_json(groups: &[RepoGroup], common: &CommonArgs) -> anyhow::Result<()> {
    let output = ReposOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        since: common.since.clone(),
        until: common.until.clone(),
        entries: groups.iter().map(RepoEntry::from).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(groups: &[RepoGroup]) -> anyhow::Result<()> {
    for group in groups {
        println!("{}", serde_json::to_string(&RepoEntry::from(group))?);
    }
    Ok(())
}

fn output_table(groups: &[RepoGroup]) -> anyhow::Result<()> {
    if groups.is_empty() {
        println!("No commits to display");
        return Ok(());
    }

    for group in groups {
        println!(
            "{} {} {} ({} commits)",
            style(&group.repo_name).bold(),
            style(format!("+{}", group.additions)).green(),
            style(format!("-{}", group.deletions)).red(),
            group.commits.len()
        );
        for commit in &group.commits {
            println!(
                "  {} {} {}",
                style(commit.short_sha()).yellow(),
                style(commit.author_date.format("%Y-%m-%d %H:%M")).dim(),
                commit.title()
            );
        }
        println!();
    }
    Ok(())
}
