//! Output formatting for command results

use anyhow::Result;
use serde_json::json;
use std::time::Duration;
use tio_common::{Folder, Scan, Template};
use tio_helpers::StopAllReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Table,
    Json,
    Csv,
}

fn parse_format(format: &str) -> Format {
    match format.trim().to_lowercase().as_str() {
        "json" | "j" => Format::Json,
        "csv" | "c" => Format::Csv,
        "table" | "text" | "t" | "" => Format::Table,
        other => {
            eprintln!("Warning: Unknown format '{}', using default table format", other);
            Format::Table
        }
    }
}

/// Print a scan listing in the order the service returned it.
pub fn print_scans(scans: &[Scan], format: &str) -> Result<()> {
    match parse_format(format) {
        Format::Json => println!("{}", serde_json::to_string_pretty(scans)?),
        Format::Csv => {
            for line in scans_csv(scans) {
                println!("{}", line);
            }
        }
        Format::Table => {
            if scans.is_empty() {
                println!("\nNo scans to display.\n");
                return Ok(());
            }
            println!("\n{:-<80}", "");
            println!("{:<10} {:<44} {:<14} {:<10}", "ID", "NAME", "STATUS", "FOLDER");
            println!("{:-<80}", "");
            for scan in scans {
                println!(
                    "{:<10} {:<44} {:<14} {:<10}",
                    scan.id,
                    truncate(&scan.name, 44),
                    scan.status.as_str(),
                    scan.folder_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
                );
            }
            println!("{:-<80}", "");
            println!("  Total: {}\n", scans.len());
        }
    }
    Ok(())
}

pub fn print_template(template: &Template, format: &str) -> Result<()> {
    match parse_format(format) {
        Format::Json => println!("{}", serde_json::to_string_pretty(template)?),
        Format::Csv => {
            println!("uuid,name,title");
            println!("{},{},{}", template.uuid, csv_field(&template.name), csv_field(&template.title));
        }
        Format::Table => {
            println!("uuid:  {}", template.uuid);
            println!("name:  {}", template.name);
            println!("title: {}", template.title);
            if let Some(description) = &template.description {
                println!("description: {}", description);
            }
        }
    }
    Ok(())
}

pub fn print_folders(folders: &[Folder], format: &str) -> Result<()> {
    match parse_format(format) {
        Format::Json => println!("{}", serde_json::to_string_pretty(folders)?),
        Format::Csv => {
            println!("id,name,type");
            for folder in folders {
                println!(
                    "{},{},{}",
                    folder.id,
                    csv_field(&folder.name),
                    folder.kind.as_deref().unwrap_or("")
                );
            }
        }
        Format::Table => {
            println!("{:<10} {:<40} {:<10}", "ID", "NAME", "TYPE");
            for folder in folders {
                println!(
                    "{:<10} {:<40} {:<10}",
                    folder.id,
                    truncate(&folder.name, 40),
                    folder.kind.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

pub fn print_stop_report(report: &StopAllReport, format: &str, elapsed: Duration) -> Result<()> {
    match parse_format(format) {
        Format::Json => {
            let output = json!({
                "total": report.total,
                "stop_requested": report.stop_requested,
                "stop_failed": report.stop_failed,
                "settled": report.settled,
                "duration_seconds": elapsed.as_secs_f64(),
                "duration_formatted": format_duration(elapsed),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Csv => {
            println!("total,stop_requested,stop_failed,settled,duration_ms");
            println!(
                "{},{},{},{},{}",
                report.total,
                report.stop_requested,
                report.stop_failed,
                report.settled,
                elapsed.as_millis()
            );
        }
        Format::Table => {
            println!("\nStop summary:");
            println!("  Scans: {}", report.total);
            println!("  Stop requested: {}", report.stop_requested);
            println!("  Stop failed: {}", report.stop_failed);
            println!("  Settled: {}", report.settled);
            println!("  Duration: {}", format_duration(elapsed));
            println!();
        }
    }
    Ok(())
}

fn scans_csv(scans: &[Scan]) -> Vec<String> {
    let mut lines = Vec::with_capacity(scans.len() + 1);
    lines.push("id,name,status,folder_id".to_string());
    lines.extend(scans.iter().map(scan_csv_row));
    lines
}

fn scan_csv_row(scan: &Scan) -> String {
    format!(
        "{},{},{},{}",
        scan.id,
        csv_field(&scan.name),
        scan.status,
        scan.folder_id.map(|id| id.to_string()).unwrap_or_default()
    )
}

/// Quote a free-text CSV field.
fn csv_field(value: &str) -> String {
    let escaped = value.replace('"', "\"\"").replace('\n', " ").replace('\r', "");
    format!("\"{}\"", escaped)
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let kept: String = value.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        value.to_string()
    }
}

/// Format duration in a human-readable way
fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs == 0 {
        format!("{}ms", millis)
    } else if total_secs < 60 {
        if millis > 0 {
            format!("{}.{:03}s", total_secs, millis)
        } else {
            format!("{}s", total_secs)
        }
    } else {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        if secs > 0 {
            format!("{}m {}s", mins, secs)
        } else {
            format!("{}m", mins)
        }
    }
}
