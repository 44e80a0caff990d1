use crate::error::Result;
use crate::github::{GitHubApi, IssueState, Repository};
use crate::model::RepoStatistics;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};

const LOG_TARGET: &str = "ghstats::stats";

/// Gather the activity counters of `repo` since `since`.
///
/// Every call walks the remote collections from the start; nothing is carried over
/// between attempts.
pub fn collect_repo_stats<A: GitHubApi + ?Sized>(
    api: &A,
    repo: &Repository,
    since: DateTime<Utc>,
) -> Result<RepoStatistics> {
    log::info!(target: LOG_TARGET, "Getting issues for {}", repo.full_name);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix(format!("Getting issues for {}...", repo.full_name));

    // Redirected stderr hides the spinner; fall back to a plain line.
    let plain = pb.is_hidden();
    if plain {
        eprint!("Getting issues for {}...", repo.full_name);
    }

    let mut stats = RepoStatistics::new(repo.full_name.clone());

    pb.set_message("issues");
    for issue in api.issues_since(repo, since)? {
        stats.total_issues += 1;
        if issue.state == IssueState::Closed {
            stats.closed_issues += 1;
        }
        stats.issue_comment_count += api.issue_comments(repo, &issue)?.len() as u64;
        pb.tick();
    }

    pb.set_message("commits");
    stats.num_commits = api.commits_since(repo, since)?.len() as u64;

    // Commit comments cannot be filtered by date on the server.
    pb.set_message("commit comments");
    stats.num_commit_comments = api
        .commit_comments(repo)?
        .iter()
        .filter(|c| c.created_at >= since)
        .count() as u64;

    pb.set_message("pull requests");
    for pull in api.pull_requests(repo)? {
        if pull.active_since(&since) {
            stats.total_pr_comments += api.review_comments(repo, &pull)?.len() as u64;
        }
        pb.tick();
    }

    pb.finish_with_message("done");
    if plain {
        eprintln!(" done");
    }
    log::info!(
        target: LOG_TARGET,
        "Finished {}: {} issues, {} commits, sum {}",
        stats.name,
        stats.total_issues,
        stats.num_commits,
        stats.total()
    );

    Ok(stats)
}
