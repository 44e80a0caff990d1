/// Activity counters gathered for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoStatistics {
    pub name: String,
    pub total_issues: u64,
    pub closed_issues: u64,
    pub num_commits: u64,
    pub num_commit_comments: u64,
    pub issue_comment_count: u64,
    pub total_pr_comments: u64,
}

impl RepoStatistics {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_issues: 0,
            closed_issues: 0,
            num_commits: 0,
            num_commit_comments: 0,
            issue_comment_count: 0,
            total_pr_comments: 0,
        }
    }

    /// Sum of the independent counters; `closed_issues` is a subset of
    /// `total_issues` and is not added again.
    pub fn total(&self) -> u64 {
        self.total_issues
            + self.num_commits
            + self.num_commit_comments
            + self.issue_comment_count
            + self.total_pr_comments
    }
}
