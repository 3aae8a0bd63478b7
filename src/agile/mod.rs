//! Agile resource group: boards, their backlogs, issues, sprints and projects.

pub mod resolve;

use tracing::debug;

use crate::config::JiraConfig;
use crate::deserialize::{parse_issue_page, parse_one, parse_values, parse_values_page};
use crate::error::Result;
use crate::model::{Board, Issue, IssuePage, Project, Sprint, ValuesPage};
use crate::query::{PageOptions, DEFAULT_MAX_RESULTS};
use crate::transport::HttpClient;

pub use resolve::resolve_issues;

/// Where the Agile and generic REST APIs live relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    agile_base: String,
    search: String,
}

impl ApiPaths {
    pub fn new(context_path: &str, rest_base_path: Option<&str>) -> Self {
        let context = context_path.trim_end_matches('/');
        let rest_base = match rest_base_path {
            Some(path) => path.trim_end_matches('/').to_string(),
            None => format!("{context}/rest/api/2"),
        };
        Self {
            agile_base: format!("{context}/rest/agile/1.0"),
            search: format!("{rest_base}/search"),
        }
    }

    pub fn from_config(config: &JiraConfig) -> Self {
        Self::new(&config.context_path, config.rest_base_path.as_deref())
    }

    pub fn agile(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.agile_base)
    }

    pub fn search(&self) -> &str {
        &self.search
    }
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self::new("", None)
    }
}

pub struct AgileClient<C> {
    http: C,
    paths: ApiPaths,
}

impl<C: HttpClient> AgileClient<C> {
    pub fn new(http: C, paths: ApiPaths) -> Self {
        Self { http, paths }
    }

    async fn fetch(&self, endpoint: &str) -> Result<String> {
        let url = self.paths.agile(endpoint);
        debug!(%url, "agile request");
        let resp = self.http.get(&url).await?;
        Ok(resp.body)
    }

    pub async fn list_boards(&self) -> Result<ValuesPage<Board>> {
        let body = self.fetch("board").await?;
        Ok(parse_values_page(&body)?)
    }

    /// Backlog issues of a board, always requested 100 at a time.
    pub async fn list_backlog_issues(&self, board_id: u64) -> Result<IssuePage> {
        let body = self
            .fetch(&format!(
                "board/{board_id}/backlog?maxResults={DEFAULT_MAX_RESULTS}"
            ))
            .await?;
        Ok(parse_issue_page(&body, false)?)
    }

    /// Issues on a board, resolved to their full form through search.
    ///
    /// The listing request only carries the options actually given; when
    /// none are, the URL ends in a bare `?`. A `max_results` is forwarded to
    /// the search request as well.
    pub async fn list_board_issues(
        &self,
        board_id: u64,
        options: &PageOptions,
    ) -> Result<Vec<Issue>> {
        let body = self
            .fetch(&format!(
                "board/{board_id}/issue?{}",
                options.to_query_string()
            ))
            .await?;
        let page = parse_issue_page(&body, false)?;
        debug!(board_id, count = page.issues.len(), "board issues listed");

        resolve_issues(&self.http, self.paths.search(), &page.ids(), options.max_results).await
    }

    pub async fn list_sprints(
        &self,
        board_id: u64,
        options: &PageOptions,
    ) -> Result<ValuesPage<Sprint>> {
        let query = options
            .with_default_max_results(DEFAULT_MAX_RESULTS)
            .to_query_string();
        let body = self.fetch(&format!("board/{board_id}/sprint?{query}")).await?;
        Ok(parse_values_page(&body)?)
    }

    pub async fn sprint(&self, sprint_id: u64) -> Result<Sprint> {
        let body = self.fetch(&format!("sprint/{sprint_id}")).await?;
        Ok(parse_one(&body)?)
    }

    pub async fn list_sprint_issues(
        &self,
        sprint_id: u64,
        options: &PageOptions,
    ) -> Result<IssuePage> {
        let query = options
            .with_default_max_results(DEFAULT_MAX_RESULTS)
            .to_query_string();
        let body = self
            .fetch(&format!("sprint/{sprint_id}/issue?{query}"))
            .await?;
        Ok(parse_issue_page(&body, false)?)
    }

    pub async fn list_projects(
        &self,
        board_id: u64,
        options: &PageOptions,
    ) -> Result<ValuesPage<Project>> {
        let query = options
            .with_default_max_results(DEFAULT_MAX_RESULTS)
            .to_query_string();
        let body = self
            .fetch(&format!("board/{board_id}/project?{query}"))
            .await?;
        Ok(parse_values_page(&body)?)
    }

    pub async fn list_full_projects(&self, board_id: u64) -> Result<Vec<Project>> {
        let body = self
            .fetch(&format!("board/{board_id}/project/full"))
            .await?;
        Ok(parse_values(&body)?)
    }
}
