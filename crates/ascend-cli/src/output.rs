//! Output renderers and formatting helpers.

use std::io::Write;
use std::path::Path;

use anyhow::anyhow;
use ascend_nav::{DirEntrySummary, EntryKind};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Everything the `up` command reports.
#[derive(Debug, Serialize)]
pub(crate) struct UpReport<'a> {
    pub(crate) outcome: &'static str,
    pub(crate) from: &'a Path,
    pub(crate) location: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) entries: Option<&'a [DirEntrySummary]>,
}

pub(crate) fn render_up(
    report: &UpReport<'_>,
    format: OutputFormat,
    out: &mut impl Write,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(report)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            writeln!(out, "{text}").map_err(write_failed)?;
        }
        OutputFormat::Table => match report.outcome {
            "at_root" => writeln!(
                out,
                "already at filesystem root: {}",
                report.location.display()
            )
            .map_err(write_failed)?,
            "declined" => writeln!(out, "navigation declined").map_err(write_failed)?,
            _ => {
                writeln!(out, "{}", report.location.display()).map_err(write_failed)?;
                if let Some(entries) = report.entries {
                    render_entries(entries, out)?;
                }
            }
        },
    }
    Ok(())
}

fn render_entries(entries: &[DirEntrySummary], out: &mut impl Write) -> CliResult<()> {
    if entries.is_empty() {
        writeln!(out, "(empty)").map_err(write_failed)?;
        return Ok(());
    }
    writeln!(out, "{:<5} {:>10} {:<16} NAME", "KIND", "SIZE", "MODIFIED").map_err(write_failed)?;
    for entry in entries {
        let size = if entry.kind == EntryKind::Directory {
            "-".to_string()
        } else {
            format_bytes(entry.size_bytes)
        };
        let modified = entry.modified.map_or_else(
            || "-".to_string(),
            |stamp| stamp.format("%Y-%m-%d %H:%M").to_string(),
        );
        let suffix = if entry.kind == EntryKind::Directory { "/" } else { "" };
        writeln!(
            out,
            "{:<5} {:>10} {:<16} {}{}",
            entry.kind.as_str(),
            size,
            modified,
            entry.name,
            suffix
        )
        .map_err(write_failed)?;
    }
    Ok(())
}

fn write_failed(err: std::io::Error) -> CliError {
    CliError::failure(anyhow!("failed to write output: {err}"))
}

#[must_use]
pub(crate) fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;
    let value = bytes_to_f64(bytes);
    if value >= GIB {
        format!("{:.1} GiB", value / GIB)
    } else if value >= MIB {
        format!("{:.1} MiB", value / MIB)
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{bytes} B")
    }
}

fn bytes_to_f64(value: u64) -> f64 {
    let high = u32::try_from(value >> 32).unwrap_or(u32::MAX);
    let low = u32::try_from(value & 0xFFFF_FFFF).unwrap_or(u32::MAX);
    f64::from(high) * 4_294_967_296.0 + f64::from(low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn render(
        report: &UpReport<'_>,
        format: OutputFormat,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let mut out = Vec::new();
        render_up(report, format, &mut out).map_err(|err| err.display_message())?;
        Ok(String::from_utf8(out)?)
    }

    fn entries() -> Vec<DirEntrySummary> {
        vec![
            DirEntrySummary {
                name: "src".to_string(),
                path: PathBuf::from("/work/src"),
                kind: EntryKind::Directory,
                size_bytes: 4096,
                modified: None,
            },
            DirEntrySummary {
                name: "notes.txt".to_string(),
                path: PathBuf::from("/work/notes.txt"),
                kind: EntryKind::File,
                size_bytes: 2048,
                modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).single(),
            },
        ]
    }

    #[test]
    fn table_renders_each_outcome() -> Result<(), Box<dyn std::error::Error>> {
        let root = Path::new("/");
        let at_root = UpReport {
            outcome: "at_root",
            from: root,
            location: root,
            entries: None,
        };
        assert_eq!(render(&at_root, OutputFormat::Table)?, "already at filesystem root: /\n");

        let declined = UpReport {
            outcome: "declined",
            from: Path::new("/work/src"),
            location: Path::new("/work/src"),
            entries: None,
        };
        assert_eq!(render(&declined, OutputFormat::Table)?, "navigation declined\n");

        let listing = entries();
        let navigated = UpReport {
            outcome: "navigated",
            from: Path::new("/work/src"),
            location: Path::new("/work"),
            entries: Some(&listing),
        };
        let text = render(&navigated, OutputFormat::Table)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "/work");
        assert!(lines[1].starts_with("KIND"));
        assert!(lines[2].starts_with("dir") && lines[2].ends_with("src/"));
        assert!(lines[3].contains("2.0 KiB") && lines[3].contains("2024-05-01 12:30"));
        Ok(())
    }

    #[test]
    fn json_includes_entries_only_when_listed() -> Result<(), Box<dyn std::error::Error>> {
        let listing = entries();
        let navigated = UpReport {
            outcome: "navigated",
            from: Path::new("/work/src"),
            location: Path::new("/work"),
            entries: Some(&listing),
        };
        let value: serde_json::Value =
            serde_json::from_str(&render(&navigated, OutputFormat::Json)?)?;
        assert_eq!(value["outcome"], "navigated");
        assert_eq!(value["location"], "/work");
        assert_eq!(value["entries"][0]["kind"], "directory");

        let declined = UpReport {
            outcome: "declined",
            from: Path::new("/work"),
            location: Path::new("/work"),
            entries: None,
        };
        let value: serde_json::Value =
            serde_json::from_str(&render(&declined, OutputFormat::Json)?)?;
        assert!(value.get("entries").is_none());
        Ok(())
    }

    #[test]
    fn format_bytes_scales_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
    }
}
