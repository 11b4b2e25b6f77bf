use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tio")]
#[command(version)]
#[command(about = "Tenable.io scan workflow client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// TOML file with endpoint and API keys (TENABLEIO_* variables still apply)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format: text, json, csv
    #[arg(short, long, global = true, default_value = "text", value_parser = ["text", "json", "csv"])]
    pub output_format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Session checks
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
    /// Scan templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommand,
    },
    /// Scans
    Scans {
        #[command(subcommand)]
        command: ScanCommand,
    },
    /// Folders
    Folders {
        #[command(subcommand)]
        command: FolderCommand,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Fail unless the configured keys map to an authorized session
    Validate,
}

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// Look a scan template up by exact name or exact title
    Get {
        #[arg(long, conflicts_with = "title", required_unless_present = "title")]
        name: Option<String>,

        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ScanCommand {
    /// List scans, optionally filtered
    List {
        /// Only scans in this folder
        #[arg(long)]
        folder: Option<i64>,

        /// Exact, case-sensitive name
        #[arg(long, conflicts_with = "regex")]
        name: Option<String>,

        /// Regular expression the whole name must match
        #[arg(long)]
        regex: Option<String>,
    },
    /// Create a scan from a template name or title
    Create {
        #[arg(short, long)]
        name: String,

        /// Comma-separated targets. Example: 10.0.0.1,10.0.0.0/24,example.com
        #[arg(short = 't', long)]
        targets: String,

        /// Template name, or title when no name matches
        #[arg(long)]
        template: String,

        /// Launch the scan after creating it
        #[arg(long)]
        launch: bool,

        /// After launching, wait until the scan settles
        #[arg(long, requires = "launch")]
        wait: bool,

        /// Poll interval in milliseconds
        #[arg(long, default_value = "5000", value_parser = clap::value_parser!(u64).range(1..))]
        poll_ms: u64,
    },
    /// Stop scans and wait until every one of them has settled
    StopAll {
        /// Only scans in this folder
        #[arg(long)]
        folder: Option<i64>,

        /// Poll interval in milliseconds
        #[arg(long, default_value = "5000", value_parser = clap::value_parser!(u64).range(1..))]
        poll_ms: u64,

        /// Give up waiting on a scan after this many seconds (default: wait indefinitely)
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Send stop requests and wait on all scans at once
        #[arg(long)]
        concurrent: bool,
    },
}

#[derive(Subcommand)]
pub enum FolderCommand {
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_all_defaults() {
        let cli = Cli::try_parse_from(["tio", "scans", "stop-all"]).unwrap();
        match cli.command {
            Commands::Scans {
                command: ScanCommand::StopAll { folder, poll_ms, timeout_secs, concurrent },
            } => {
                assert_eq!(folder, None);
                assert_eq!(poll_ms, 5000);
                assert_eq!(timeout_secs, None);
                assert!(!concurrent);
            }
            _ => panic!("expected scans stop-all"),
        }
        assert_eq!(cli.output_format, "text");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tio", "folders", "list", "-vv", "-o", "json", "--endpoint", "http://localhost:9"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output_format, "json");
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9"));
    }

    #[test]
    fn test_name_and_regex_conflict() {
        assert!(Cli::try_parse_from(["tio", "scans", "list", "--name", "a", "--regex", "b.*"]).is_err());
    }

    #[test]
    fn test_template_requires_name_or_title() {
        assert!(Cli::try_parse_from(["tio", "templates", "get"]).is_err());
        assert!(Cli::try_parse_from(["tio", "templates", "get", "--title", "Basic Network Scan"]).is_ok());
    }

    #[test]
    fn test_wait_requires_launch() {
        let base = ["tio", "scans", "create", "--name", "n", "--targets", "10.0.0.1", "--template", "basic"];
        let mut with_wait = base.to_vec();
        with_wait.push("--wait");
        assert!(Cli::try_parse_from(with_wait).is_err());
        let mut launched = base.to_vec();
        launched.extend(["--launch", "--wait"]);
        assert!(Cli::try_parse_from(launched).is_ok());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        assert!(Cli::try_parse_from(["tio", "scans", "stop-all", "--poll-ms", "0"]).is_err());
        let create = ["tio", "scans", "create", "--name", "n", "--targets", "10.0.0.1", "--template", "basic", "--poll-ms", "0"];
        assert!(Cli::try_parse_from(create).is_err());
        assert!(Cli::try_parse_from(["tio", "scans", "stop-all", "--poll-ms", "1"]).is_ok());
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        assert!(Cli::try_parse_from(["tio", "-o", "yaml", "folders", "list"]).is_err());
    }
}
