//! `tracker schedule` / `tracker unschedule`
//!
//! Manages one marker-tagged line in the user's crontab that invokes
//! `tracker refresh` periodically. The cron daemon is the scheduling
//! collaborator; this command only edits the table.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use tracker::CatalogStore;

/// Marker identifying the line this tool owns.
const CRON_MARKER: &str = "# tracker-refresh";

pub fn schedule(store: &CatalogStore, every_hours: u32, assume_yes: bool) -> Result<()> {
    if every_hours == 0 || every_hours > 24 {
        bail!("refresh interval must be between 1 and 24 hours");
    }
    ensure_crontab()?;

    let line = cron_line(every_hours, store)?;
    println!("{}\n  {}", "Will install cron entry:".bold(), line);

    if !confirmed(assume_yes, "Modify your crontab?")? {
        println!("{}", "Aborted".yellow());
        return Ok(());
    }

    let mut lines = read_crontab()?;
    lines.retain(|l| !l.contains(CRON_MARKER));
    lines.push(line);
    write_crontab(&lines)?;

    println!(
        "{} refresh every {} hour(s)",
        "Scheduled:".bright_green().bold(),
        every_hours
    );
    Ok(())
}

pub fn unschedule(assume_yes: bool) -> Result<()> {
    ensure_crontab()?;

    let lines = read_crontab()?;
    let remaining: Vec<String> = lines
        .iter()
        .filter(|l| !l.contains(CRON_MARKER))
        .cloned()
        .collect();

    if remaining.len() == lines.len() {
        println!("{}", "No scheduled refresh found".yellow());
        return Ok(());
    }

    if !confirmed(assume_yes, "Remove the scheduled refresh from your crontab?")? {
        println!("{}", "Aborted".yellow());
        return Ok(());
    }

    write_crontab(&remaining)?;
    println!("{}", "Scheduled refresh removed".bright_green().bold());
    Ok(())
}

fn confirmed(assume_yes: bool, prompt: &str) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

fn ensure_crontab() -> Result<()> {
    which::which("crontab")
        .map(|_| ())
        .map_err(|_| anyhow!("crontab not found on PATH; scheduling needs cron"))
}

/// The crontab line: run `tracker refresh` from the current directory
/// against the configured catalog file.
fn cron_line(every_hours: u32, store: &CatalogStore) -> Result<String> {
    let exe = std::env::current_exe().context("cannot locate the tracker binary")?;
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let catalog = cwd.join(store.path());

    let expr = if every_hours == 24 {
        "0 0 * * *".to_string()
    } else {
        format!("0 */{} * * *", every_hours)
    };

    Ok(format!(
        "{} cd {} && {} --catalog {} refresh >> tracker-refresh.log 2>&1 {}",
        expr,
        cwd.display(),
        exe.display(),
        catalog.display(),
        CRON_MARKER
    ))
}

fn read_crontab() -> Result<Vec<String>> {
    let output = Command::new("crontab").arg("-l").output()?;
    if !output.status.success() {
        // No crontab for this user yet.
        return Ok(Vec::new());
    }
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect())
}

fn write_crontab(lines: &[String]) -> Result<()> {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    let mut child = Command::new("crontab")
        .arg("-")
        .stdin(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .as_mut()
        .ok_or_else(|| anyhow!("failed to open crontab stdin"))?
        .write_all(content.as_bytes())?;

    let status = child.wait()?;
    if !status.success() {
        bail!("crontab rejected the new table");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cron_line_daily_and_hourly() {
        let store = CatalogStore::new("catalog.json");

        let daily = cron_line(24, &store).unwrap();
        assert!(daily.starts_with("0 0 * * * "));
        assert!(daily.ends_with(CRON_MARKER));
        assert!(daily.contains("refresh"));

        let every_six = cron_line(6, &store).unwrap();
        assert!(every_six.starts_with("0 */6 * * * "));
    }
}
