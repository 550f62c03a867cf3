use super::{streak_svg, Palette, MAX_WINDOW_DAYS};
use crate::cli::CommonArgs;
use crate::util::local_midnight;
use anyhow::Context;
use chrono::{Duration, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub fn exec(common: CommonArgs, output: Option<PathBuf>) -> anyhow::Result<()> {
    let tz = common.zone()?;
    let now = Utc::now();
    let mut range = common.range(&tz, now)?;

    // Default window: the most recent days up to and including today in `tz`.
    let tomorrow = now.with_timezone(&tz).date_naive() + Duration::days(1);
    let end = range.until.unwrap_or_else(|| local_midnight(tomorrow, &tz).with_timezone(&Utc));
    let start = range.since.unwrap_or(end - Duration::days(MAX_WINDOW_DAYS));
    anyhow::ensure!(start <= end, "streak window starts ({start}) after it ends ({end})");
    // The first cell covers the whole local day of `start`.
    let first_day = local_midnight(start.with_timezone(&tz).date_naive(), &tz).with_timezone(&Utc);
    range = range.with_since(first_day).with_until(end);

    let commits = common.load_commits(&range)?;
    let palette = Palette::default();

    match output {
        Some(path) => {
            let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            streak_svg(&commits, &tz, start, end, &palette, &mut out).context("Failed to write SVG")?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            streak_svg(&commits, &tz, start, end, &palette, &mut out).context("Failed to write SVG")?;
            out.flush()?;
        }
    }

    Ok(())
}
