pub mod client;
pub mod models;

pub use client::GitHubClient;
pub use models::{
    Commit, CommitComment, Issue, IssueComment, IssueState, Organization, Owner, PullRequest,
    Repository, ReviewComment,
};

use crate::error::Result;
use chrono::{DateTime, Utc};

/// The remote operations the statistics need.
///
/// Every listing returns the complete, already paginated collection.
pub trait GitHubApi {
    fn organization(&self, name: &str) -> Result<Organization>;

    fn organization_repos(&self, org: &Organization) -> Result<Vec<Repository>>;

    /// Look up a repository by its `owner/name`.
    fn repository(&self, full_name: &str) -> Result<Repository>;

    /// Issues in any state updated since `since`.
    fn issues_since(&self, repo: &Repository, since: DateTime<Utc>) -> Result<Vec<Issue>>;

    fn issue_comments(&self, repo: &Repository, issue: &Issue) -> Result<Vec<IssueComment>>;

    fn commits_since(&self, repo: &Repository, since: DateTime<Utc>) -> Result<Vec<Commit>>;

    /// All commit comments of the repository, unfiltered.
    fn commit_comments(&self, repo: &Repository) -> Result<Vec<CommitComment>>;

    /// Pull requests in any state.
    fn pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequest>>;

    fn review_comments(&self, repo: &Repository, pull: &PullRequest) -> Result<Vec<ReviewComment>>;
}
