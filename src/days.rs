use crate::cli::CommonArgs;
use crate::group::day_groups;
use crate::model::{DayBucket, DayEntry, DaysOutput, SCHEMA_VERSION};
use chrono::{FixedOffset, Utc};
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let tz = common.zone()?;
    let range = common.range(&tz, Utc::now())?;
    let commits = common.load_commits(&range)?;

    let buckets = day_groups(&commits, &tz);

    if json {
        output_json(&buckets, &tz, &common)?;
    } else if ndjson {
        output_ndjson(&buckets)?;
    } else {
        output_days(&buckets)?;
    }

    Ok(())
}

fn output_json(buckets: &[DayBucket<FixedOffset>], tz: &FixedOffset, common: &CommonArgs) -> anyhow::Result<()> {
    let output = DaysOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        time_zone: tz.to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        entries: buckets.iter().map(DayEntry::from).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(buckets: &[DayBucket<FixedOffset>]) -> anyhow::Result<()> {
    for bucket in buckets {
        println!("{}", serde_json::to_string(&DayEntry::from(bucket))?);
    }
    Ok(())
}

fn output_days(buckets: &[DayBucket<FixedOffset>]) -> anyhow::Result<()> {
    if buckets.is_empty() {
        println!("No commits to display");
        return Ok(());
    }

    let max_commits = buckets.iter().map(|b| b.commits.len()).max().unwrap_or(1);

    println!("{}", style("Daily Commit Activity").bold());
    println!("{}", "─".repeat(50));

    for bucket in buckets {
        let intensity = ((bucket.commits.len() as f64 / max_commits as f64) * 5.0) as u32;
        let bar = match intensity {
            0 => " ",
            1 => "▁",
            2 => "▃",
            3 => "▅",
            4 => "▇",
            _ => "█",
        };

        println!(
            "{} {} commits: {:>3}, lines: {} {}",
            bucket.day.format("%Y-%m-%d %a"),
            style(bar).green(),
            bucket.commits.len(),
            style(format!("+{}", bucket.additions)).green(),
            style(format!("-{}", bucket.deletions)).red(),
        );
    }

    Ok(())
}
