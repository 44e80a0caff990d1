use crate::config::Config;
use crate::github::client::{GitHubClient, DEFAULT_API_URL};
use crate::retry::ThreadSleeper;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::io;

#[derive(Parser)]
#[command(name = "ghstats")]
#[command(about = "Get sorted counts of issues, commits and comments since a date for one or more GitHub organizations or repositories")]
#[command(version)]
pub struct Cli {
    #[arg(
        short = 'o',
        long = "organization",
        help = "Organization to fetch data from; can be passed more than once"
    )]
    pub organizations: Vec<String>,

    #[arg(
        short = 'r',
        long = "repository",
        help = "Repository (owner/name) to fetch data from; can be passed more than once"
    )]
    pub repositories: Vec<String>,

    #[arg(short, long, env = "GHSTATS_USERNAME", help = "Username to use for the GitHub connection")]
    pub username: String,

    #[arg(
        short,
        long,
        env = "GHSTATS_PASSWORD",
        hide_env_values = true,
        help = "Password or personal access token to use for the GitHub connection"
    )]
    pub password: String,

    #[arg(
        short,
        long,
        help = "Fetch data for repositories since this date, YYYY-MM-DD (default is one year ago)"
    )]
    pub since: Option<String>,

    #[arg(long, default_value = DEFAULT_API_URL, help = "GitHub API base URL")]
    pub api_url: String,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let config = Config::resolve(self, Utc::now()).context("Failed to resolve arguments")?;
        log::debug!("resolved {config:?}");

        let client = GitHubClient::new(&config.api_url, &config.username, &config.password)
            .context("Failed to create GitHub client")?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        crate::exec::exec(&config, &client, &ThreadSleeper, &mut out)
    }
}
