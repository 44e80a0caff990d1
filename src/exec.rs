use crate::config::Config;
use crate::github::{GitHubApi, Repository};
use crate::model::RepoStatistics;
use crate::report;
use crate::retry::{with_rate_limit_retry, Sleeper};
use crate::stats::collect_repo_stats;
use anyhow::Context;
use std::io::Write;

/// Collect statistics for every configured organization and repository, then print the ranking.
///
/// Organizations are scanned first, in the order given, followed by the explicitly named
/// repositories. Any error other than a rate limit aborts the run before anything is printed.
pub fn exec<A, S, W>(config: &Config, api: &A, sleeper: &S, out: &mut W) -> anyhow::Result<()>
where
    A: GitHubApi + ?Sized,
    S: Sleeper + ?Sized,
    W: Write,
{
    let mut repo_stats = Vec::new();

    for org_name in &config.organizations {
        let org = with_rate_limit_retry(sleeper, || api.organization(org_name))
            .with_context(|| format!("Failed to look up organization '{org_name}'"))?;

        let repos = with_rate_limit_retry(sleeper, || api.organization_repos(&org))
            .with_context(|| format!("Failed to list repositories of '{org_name}'"))?;

        for repo in &repos {
            repo_stats.push(repo_statistics(config, api, sleeper, repo)?);
        }
    }

    for repo_name in &config.repositories {
        let repo = with_rate_limit_retry(sleeper, || api.repository(repo_name))
            .with_context(|| format!("Failed to look up repository '{repo_name}'"))?;

        repo_stats.push(repo_statistics(config, api, sleeper, &repo)?);
    }

    report::rank(&mut repo_stats);
    report::render(out, &config.since, &repo_stats).context("Failed to write report")?;

    Ok(())
}

fn repo_statistics<A, S>(
    config: &Config,
    api: &A,
    sleeper: &S,
    repo: &Repository,
) -> anyhow::Result<RepoStatistics>
where
    A: GitHubApi + ?Sized,
    S: Sleeper + ?Sized,
{
    with_rate_limit_retry(sleeper, || collect_repo_stats(api, repo, config.since))
        .with_context(|| format!("Failed to collect statistics for '{}'", repo.full_name))
}
