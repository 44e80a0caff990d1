#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use ghstats::config::Config;
use ghstats::error::{ApiError, Result};
use ghstats::github::{
    Commit, CommitComment, GitHubApi, Issue, IssueComment, IssueState, Organization,
    PullRequest, Repository, ReviewComment,
};
use ghstats::retry::Sleeper;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn repository(full_name: &str) -> Repository {
    Repository::from_full_name(full_name).unwrap()
}

pub fn config(orgs: &[&str], repos: &[&str], since: DateTime<Utc>) -> Config {
    Config {
        organizations: orgs.iter().map(|s| s.to_string()).collect(),
        repositories: repos.iter().map(|s| s.to_string()).collect(),
        username: "octocat".to_string(),
        password: "secret".to_string(),
        since,
        api_url: "http://127.0.0.1:9".to_string(),
    }
}

pub fn rate_limit() -> ApiError {
    ApiError::new(403, "API rate limit exceeded for user ID 1.")
        .with_documentation_url("https://developer.github.com/v3/#rate-limiting")
}

#[derive(Default, Clone)]
pub struct FakeRepo {
    /// Issue state and its number of comments.
    pub issues: Vec<(IssueState, usize)>,
    pub commits: usize,
    pub commit_comments: Vec<DateTime<Utc>>,
    /// Pull request and its number of review comments.
    pub pulls: Vec<(PullRequest, usize)>,
}

impl FakeRepo {
    pub fn with_commits(commits: usize) -> Self {
        Self {
            commits,
            ..Self::default()
        }
    }
}

pub fn pull(number: u64, merged_at: Option<DateTime<Utc>>, updated_at: Option<DateTime<Utc>>) -> PullRequest {
    PullRequest {
        number,
        merged_at,
        closed_at: merged_at,
        updated_at,
    }
}

/// In-memory GitHub that records every call by name, e.g. `"commits acme/widgets"`.
#[derive(Default)]
pub struct FakeGitHub {
    pub orgs: HashMap<String, Vec<String>>,
    pub repos: HashMap<String, FakeRepo>,
    pub calls: RefCell<Vec<String>>,
    /// Call name and how many more times it answers with a rate-limit error.
    pub rate_limited: RefCell<HashMap<String, usize>>,
    /// Call name and the error it always answers with.
    pub failures: HashMap<String, ApiError>,
}

impl FakeGitHub {
    pub fn with_repo(mut self, full_name: &str, repo: FakeRepo) -> Self {
        self.repos.insert(full_name.to_string(), repo);
        self
    }

    pub fn with_org(mut self, org: &str, repos: &[&str]) -> Self {
        self.orgs
            .insert(org.to_string(), repos.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn rate_limit(self, call: &str, times: usize) -> Self {
        self.rate_limited.borrow_mut().insert(call.to_string(), times);
        self
    }

    pub fn fail(mut self, call: &str, err: ApiError) -> Self {
        self.failures.insert(call.to_string(), err);
        self
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == call).count()
    }

    fn call(&self, name: String) -> Result<()> {
        self.calls.borrow_mut().push(name.clone());

        if let Some(remaining) = self.rate_limited.borrow_mut().get_mut(&name) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(rate_limit().into());
            }
        }
        if let Some(err) = self.failures.get(&name) {
            return Err(err.clone().into());
        }
        Ok(())
    }

    fn repo(&self, repo: &Repository) -> Result<&FakeRepo> {
        self.repos
            .get(&repo.full_name)
            .ok_or_else(|| ApiError::new(404, "Not Found").into())
    }
}

impl GitHubApi for FakeGitHub {
    fn organization(&self, name: &str) -> Result<Organization> {
        self.call(format!("org {name}"))?;
        if !self.orgs.contains_key(name) {
            return Err(ApiError::new(404, "Not Found").into());
        }
        Ok(Organization {
            login: name.to_string(),
        })
    }

    fn organization_repos(&self, org: &Organization) -> Result<Vec<Repository>> {
        self.call(format!("org_repos {}", org.login))?;
        Ok(self.orgs[&org.login].iter().map(|r| repository(r)).collect())
    }

    fn repository(&self, full_name: &str) -> Result<Repository> {
        self.call(format!("repo {full_name}"))?;
        if !self.repos.contains_key(full_name) {
            return Err(ApiError::new(404, "Not Found").into());
        }
        Ok(repository(full_name))
    }

    fn issues_since(&self, repo: &Repository, _since: DateTime<Utc>) -> Result<Vec<Issue>> {
        self.call(format!("issues {}", repo.full_name))?;
        Ok(self
            .repo(repo)?
            .issues
            .iter()
            .enumerate()
            .map(|(i, (state, _))| Issue {
                number: i as u64 + 1,
                state: *state,
            })
            .collect())
    }

    fn issue_comments(&self, repo: &Repository, issue: &Issue) -> Result<Vec<IssueComment>> {
        self.call(format!("issue_comments {}#{}", repo.full_name, issue.number))?;
        let (_, comments) = self.repo(repo)?.issues[issue.number as usize - 1];
        Ok((0..comments)
            .map(|id| IssueComment {
                id: id as u64,
                created_at: at(2024, 1, 1),
            })
            .collect())
    }

    fn commits_since(&self, repo: &Repository, _since: DateTime<Utc>) -> Result<Vec<Commit>> {
        self.call(format!("commits {}", repo.full_name))?;
        Ok((0..self.repo(repo)?.commits)
            .map(|i| Commit {
                sha: format!("{i:040x}"),
            })
            .collect())
    }

    fn commit_comments(&self, repo: &Repository) -> Result<Vec<CommitComment>> {
        self.call(format!("commit_comments {}", repo.full_name))?;
        Ok(self
            .repo(repo)?
            .commit_comments
            .iter()
            .enumerate()
            .map(|(id, created_at)| CommitComment {
                id: id as u64,
                created_at: *created_at,
            })
            .collect())
    }

    fn pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequest>> {
        self.call(format!("pulls {}", repo.full_name))?;
        Ok(self.repo(repo)?.pulls.iter().map(|(p, _)| p.clone()).collect())
    }

    fn review_comments(&self, repo: &Repository, pull: &PullRequest) -> Result<Vec<ReviewComment>> {
        self.call(format!("review_comments {}#{}", repo.full_name, pull.number))?;
        let (_, comments) = self
            .repo(repo)?
            .pulls
            .iter()
            .find(|(p, _)| p.number == pull.number)
            .cloned()
            .ok_or_else(|| ApiError::new(404, "Not Found"))?;
        Ok((0..comments)
            .map(|id| ReviewComment {
                id: id as u64,
                created_at: at(2024, 1, 1),
            })
            .collect())
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    pub naps: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn total(&self) -> Duration {
        self.naps.borrow().iter().sum()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.naps.borrow_mut().push(duration);
    }
}

/// Cutoff the widgets fixture is built around.
pub fn cutoff() -> DateTime<Utc> {
    at(2023, 1, 1)
}

/// 3 issues (2 closed) with one comment each, 5 commits, 2 of 3 commit comments on or
/// after the cutoff, one merged pull request with 4 review comments and one pull request
/// without any timestamp.
pub fn widgets() -> FakeRepo {
    FakeRepo {
        issues: vec![
            (IssueState::Closed, 1),
            (IssueState::Open, 1),
            (IssueState::Closed, 1),
        ],
        commits: 5,
        commit_comments: vec![at(2023, 7, 1), at(2022, 12, 31), at(2023, 1, 1)],
        pulls: vec![
            (pull(10, Some(at(2023, 3, 1)), Some(at(2023, 3, 1))), 4),
            (pull(11, None, None), 6),
        ],
    }
}
