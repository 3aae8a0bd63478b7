use serde::Serialize;

use super::Issue;

/// A `values` envelope as returned by board, sprint and project listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesPage<T> {
    pub start_at: u64,
    pub max_results: u64,
    pub is_last: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    pub values: Vec<T>,
}

/// An `issues` envelope as returned by backlog, board and sprint issue listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePage {
    pub start_at: u64,
    pub max_results: u64,
    pub total: u64,
    pub issues: Vec<Issue>,
}

impl IssuePage {
    pub fn ids(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.id.as_str()).collect()
    }
}
