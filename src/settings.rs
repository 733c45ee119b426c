//! Command line and environment settings.
//!
//! Every path and policy can come from a flag or from the environment; `main`
//! loads `.env` before parsing so both work.

use crate::error::{AuditError, Result};
use crate::input::NeverPolicy;
use crate::output::{OutputFormat, ReportStyle};
use crate::AuditOptions;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;
use std::path::PathBuf;

/// Default dhcpd configuration location.
pub const DEFAULT_CONF: &str = "/etc/dhcp/dhcpd.conf";
/// Default dhcpd lease database location.
pub const DEFAULT_LEASES: &str = "/var/lib/dhcp/dhcpd.leases";
/// Default log4rs configuration file.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Parser)]
#[command(name = "dhcp-pool-audit")]
#[command(author, version, about = "Report DHCP pool utilization per subnet", long_about = None)]
pub struct Cli {
    /// dhcpd configuration file.
    #[arg(short, long, env = "DHCP_AUDIT_CONF", default_value = DEFAULT_CONF)]
    pub conf: PathBuf,

    /// dhcpd lease database.
    #[arg(short, long, env = "DHCP_AUDIT_LEASES", default_value = DEFAULT_LEASES)]
    pub leases: PathBuf,

    /// How to treat leases that end `never`.
    #[arg(long, value_enum, env = "DHCP_AUDIT_NEVER", default_value_t = NeverPolicy::Unbounded)]
    pub never: NeverPolicy,

    /// Skip leases with unusable times instead of failing.
    #[arg(long)]
    pub skip_malformed: bool,

    /// Evaluate leases at this RFC 3339 instant instead of now.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Time zone used to display the evaluation instant.
    #[arg(long, env = "DHCP_AUDIT_TZ", default_value = "UTC")]
    pub tz: String,

    /// Highlight subnets at or above this utilization percentage.
    #[arg(long, default_value_t = 80.0)]
    pub warn_at: f64,

    /// log4rs configuration file.
    #[arg(long, default_value = DEFAULT_LOG_CONFIG)]
    pub log_config: PathBuf,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub audit: AuditOptions,
    pub style: ReportStyle,
    /// log4rs configuration handed to [`crate::logging::init_logging`].
    pub log_config: PathBuf,
}

impl Settings {
    /// Validate the parsed command line.
    pub fn from_cli(cli: Cli) -> Result<Settings> {
        Settings::from_cli_at(cli, Utc::now())
    }

    /// Like [`Settings::from_cli`], with `now` used when `--as-of` is absent.
    pub fn from_cli_at(cli: Cli, now: DateTime<Utc>) -> Result<Settings> {
        let tz: Tz = cli
            .tz
            .parse()
            .map_err(|_| AuditError::InvalidSetting(format!("unknown time zone '{}'", cli.tz)))?;

        let now = match &cli.as_of {
            Some(text) => DateTime::parse_from_rfc3339(text)
                .map_err(|e| AuditError::InvalidSetting(format!("--as-of '{text}': {e}")))?
                .with_timezone(&Utc),
            None => now,
        };

        if !cli.warn_at.is_finite() || cli.warn_at < 0.0 {
            return Err(AuditError::InvalidSetting(format!(
                "--warn-at must be a non-negative percentage, got {}",
                cli.warn_at
            )));
        }

        Ok(Settings {
            audit: AuditOptions {
                conf: cli.conf,
                leases: cli.leases,
                now,
                never_policy: cli.never,
                skip_malformed: cli.skip_malformed,
            },
            style: ReportStyle {
                format: cli.format,
                warn_at: cli.warn_at,
                as_of: now.with_timezone(&tz),
            },
            log_config: cli.log_config,
        })
    }
}
