use crate::model::RepoStatistics;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::io::{self, Write};

pub const HEADER: &str =
    "Name,Total Issues,Closed Issues,Commits,Commit Comments,Issue Comments,PR Comments,Sum";

/// Orders records by derived total, largest first.
pub fn by_total_descending(a: &RepoStatistics, b: &RepoStatistics) -> Ordering {
    b.total().cmp(&a.total())
}

/// Sort for display. Records with equal totals keep their collection order.
pub fn rank(stats: &mut [RepoStatistics]) {
    stats.sort_by(by_total_descending);
}

pub fn csv_line(stat: &RepoStatistics) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        stat.name,
        stat.total_issues,
        stat.closed_issues,
        stat.num_commits,
        stat.num_commit_comments,
        stat.issue_comment_count,
        stat.total_pr_comments,
        stat.total()
    )
}

pub fn summary_line(since: &DateTime<Utc>) -> String {
    format!(
        "----------------------- Most active repositories since {} ------------------",
        since.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Write the summary line, the header and one line per record, in the given order.
pub fn render<W: Write>(out: &mut W, since: &DateTime<Utc>, stats: &[RepoStatistics]) -> io::Result<()> {
    writeln!(out, "{}", summary_line(since))?;
    writeln!(out, "{HEADER}")?;
    for stat in stats {
        writeln!(out, "{}", csv_line(stat))?;
    }
    out.flush()
}
