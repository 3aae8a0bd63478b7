//! Second round-trip of board issue listings: the Agile endpoint only
//! returns identifiers, so full issues are fetched through search.

use tracing::{debug, warn};

use crate::deserialize::parse_issue_page;
use crate::error::Result;
use crate::model::Issue;
use crate::query::{encode_form, id_in_predicate};
use crate::transport::HttpClient;

/// Search URL for `id IN(..)` over `ids`, or `None` when there is nothing to
/// search for. `max_results` is appended only when given.
pub fn search_url<S: AsRef<str>>(
    search_path: &str,
    ids: &[S],
    max_results: Option<u64>,
) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let jql = encode_form(&id_in_predicate(ids));
    let url = match max_results {
        Some(max) => format!("{search_path}?jql={jql}&maxResults={max}"),
        None => format!("{search_path}?jql={jql}"),
    };
    Some(url)
}

/// Fetches the full issues for `ids` in one search request.
///
/// Order follows the search endpoint, which is not guaranteed to match `ids`.
pub async fn resolve_issues<C, S>(
    http: &C,
    search_path: &str,
    ids: &[S],
    max_results: Option<u64>,
) -> Result<Vec<Issue>>
where
    C: HttpClient + ?Sized,
    S: AsRef<str> + Sync,
{
    let Some(url) = search_url(search_path, ids, max_results) else {
        debug!("no issues to resolve");
        return Ok(Vec::new());
    };

    debug!(%url, count = ids.len(), "resolving issues");
    let resp = http.get(&url).await?;
    let page = parse_issue_page(resp.body(), true)?;

    if page.issues.len() != ids.len() {
        warn!(
            requested = ids.len(),
            resolved = page.issues.len(),
            "search returned a different number of issues than requested"
        );
    }

    Ok(page.issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ids_means_no_search() {
        let ids: [&str; 0] = [];
        assert_eq!(search_url("/rest/api/2/search", &ids, Some(3)), None);
    }

    #[test]
    fn search_url_without_page_size() {
        assert_eq!(
            search_url("/jira/rest/api/2/search", &["10546", "10547", "10556"], None).unwrap(),
            "/jira/rest/api/2/search?jql=id+IN%2810546%2C+10547%2C+10556%29"
        );
    }

    #[test]
    fn search_url_forwards_page_size() {
        assert_eq!(
            search_url("/rest/api/2/search", &["1", "2"], Some(3)).unwrap(),
            "/rest/api/2/search?jql=id+IN%281%2C+2%29&maxResults=3"
        );
    }
}
