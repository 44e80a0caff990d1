use super::models::{
    Commit, CommitComment, Issue, IssueComment, Organization, PullRequest, Repository, ReviewComment,
};
use super::GitHubApi;
use crate::error::{ApiError, Result, StatsError};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LINK};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;

const LOG_TARGET: &str = "ghstats::github";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: &str = "100";
const USER_AGENT: &str = concat!("ghstats/", env!("CARGO_PKG_VERSION"));

/// Blocking GitHub REST v3 client using HTTP basic authentication.
pub struct GitHubClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl GitHubClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn request(&self, url: &str) -> RequestBuilder {
        self.http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
    }

    fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!(target: LOG_TARGET, "GET {url}");

        let response = check_status(self.request(&url).send()?)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch every page of a listing endpoint, following `Link: rel="next"`.
    fn get_all<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.request(&url).query(query).query(&[("per_page", PER_PAGE)]);
        let mut items = Vec::new();
        let mut pages = 0usize;

        loop {
            pages += 1;
            log::debug!(target: LOG_TARGET, "GET {url} (page {pages})");

            let response = check_status(request.send()?)?;
            let next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_page_url);

            let body = response.text()?;
            let page: Vec<T> = serde_json::from_str(&body)?;
            items.extend(page);

            match next {
                Some(next_url) => request = self.request(&next_url),
                None => break,
            }
        }

        Ok(items)
    }
}

impl GitHubApi for GitHubClient {
    fn organization(&self, name: &str) -> Result<Organization> {
        self.get_one(&format!("/orgs/{name}"))
    }

    fn organization_repos(&self, org: &Organization) -> Result<Vec<Repository>> {
        self.get_all(
            &format!("/orgs/{}/repos", org.login),
            &[("type", "all".to_string())],
        )
    }

    fn repository(&self, full_name: &str) -> Result<Repository> {
        let repo = Repository::from_full_name(full_name).ok_or_else(|| {
            StatsError::InvalidArgument(format!(
                "Repository '{full_name}' is not of the form owner/name"
            ))
        })?;
        self.get_one(&format!("/repos/{}/{}", repo.owner.login, repo.name))
    }

    fn issues_since(&self, repo: &Repository, since: DateTime<Utc>) -> Result<Vec<Issue>> {
        self.get_all(
            &repo_path(repo, "issues"),
            &[("state", "all".to_string()), ("since", iso8601(&since))],
        )
    }

    fn issue_comments(&self, repo: &Repository, issue: &Issue) -> Result<Vec<IssueComment>> {
        self.get_all(&repo_path(repo, &format!("issues/{}/comments", issue.number)), &[])
    }

    fn commits_since(&self, repo: &Repository, since: DateTime<Utc>) -> Result<Vec<Commit>> {
        self.get_all(&repo_path(repo, "commits"), &[("since", iso8601(&since))])
    }

    fn commit_comments(&self, repo: &Repository) -> Result<Vec<CommitComment>> {
        self.get_all(&repo_path(repo, "comments"), &[])
    }

    fn pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequest>> {
        self.get_all(&repo_path(repo, "pulls"), &[("state", "all".to_string())])
    }

    fn review_comments(&self, repo: &Repository, pull: &PullRequest) -> Result<Vec<ReviewComment>> {
        self.get_all(&repo_path(repo, &format!("pulls/{}/comments", pull.number)), &[])
    }
}

fn repo_path(repo: &Repository, rest: &str) -> String {
    format!("/repos/{}/{}/{rest}", repo.owner.login, repo.name)
}

fn iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let err = parse_error_body(status.as_u16(), &body);
    log::debug!(target: LOG_TARGET, "request failed: {err}");
    Err(err.into())
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    documentation_url: Option<String>,
}

/// Turn a non-success response body into an [`ApiError`]. Bodies that are not
/// GitHub's JSON error shape are kept verbatim as the message.
pub(crate) fn parse_error_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ApiError {
            status,
            message: parsed.message.unwrap_or_default(),
            documentation_url: parsed.documentation_url,
        },
        Err(_) => ApiError::new(status, body.trim()),
    }
}

/// Extract the `rel="next"` target from an RFC 8288 `Link` header.
pub(crate) fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        if !parts.any(|p| p.trim() == r#"rel="next""#) {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
