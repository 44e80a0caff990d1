use crate::cli::Cli;
use crate::error::{Result, StatsError};
use chrono::{DateTime, Months, NaiveDate, TimeZone, Utc};
use std::fmt;

/// Everything a run needs, resolved once from the command line.
#[derive(Clone)]
pub struct Config {
    pub organizations: Vec<String>,
    pub repositories: Vec<String>,
    pub username: String,
    pub password: String,
    pub since: DateTime<Utc>,
    pub api_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("organizations", &self.organizations)
            .field("repositories", &self.repositories)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("since", &self.since)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// Resolve parsed flags against the current time `now`.
    pub fn resolve(cli: Cli, now: DateTime<Utc>) -> Result<Self> {
        let since = match cli.since.as_deref() {
            Some(s) => parse_since(s)?,
            None => one_year_before(now)?,
        };

        Ok(Self {
            organizations: cli.organizations,
            repositories: cli.repositories,
            username: cli.username,
            password: cli.password,
            since,
            api_url: cli.api_url,
        })
    }
}

/// Parse a `YYYY-MM-DD` cutoff as midnight UTC.
pub fn parse_since(input: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| StatsError::InvalidArgument(format!("Not a valid date: '{input}'.")))
}

/// The same moment one calendar year earlier. February 29th maps to February 28th.
pub fn one_year_before(now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    now.checked_sub_months(Months::new(12))
        .ok_or_else(|| StatsError::InvalidArgument(format!("Cannot compute a date one year before {now}")))
}
