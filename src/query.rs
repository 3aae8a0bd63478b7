use std::collections::BTreeMap;

use tracing::warn;

/// Page size applied by endpoints that default it client-side.
pub const DEFAULT_MAX_RESULTS: u64 = 100;

const START_AT: &str = "startAt";
const MAX_RESULTS: &str = "maxResults";

/// Pagination options accepted by the paged Agile listings.
///
/// `extra` carries parameters this crate does not model; they are sent as is,
/// after the paging parameters, in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub start_at: Option<u64>,
    pub max_results: Option<u64>,
    pub extra: BTreeMap<String, String>,
}

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_at(mut self, start_at: u64) -> Self {
        self.start_at = Some(start_at);
        self
    }

    pub fn max_results(mut self, max_results: u64) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Copy of these options with `max_results` filled in when absent.
    pub fn with_default_max_results(&self, default: u64) -> Self {
        Self {
            max_results: self.max_results.or(Some(default)),
            ..self.clone()
        }
    }

    /// Serializes to `startAt=..&maxResults=..&k=v`, omitting absent values.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        if let Some(start_at) = self.start_at {
            pairs.push(format!("{START_AT}={start_at}"));
        }
        if let Some(max_results) = self.max_results {
            pairs.push(format!("{MAX_RESULTS}={max_results}"));
        }
        for (key, value) in &self.extra {
            if key == START_AT || key == MAX_RESULTS {
                warn!(%key, "ignoring extra parameter that shadows a paging option");
                continue;
            }
            pairs.push(format!("{}={}", encode_form(key), encode_form(value)));
        }
        pairs.join("&")
    }
}

/// Form-encodes a query-string component: space becomes `+`, everything but
/// unreserved characters is percent-encoded.
pub fn encode_form(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// `id IN(a, b, c)`
pub fn id_in_predicate<S: AsRef<str>>(ids: &[S]) -> String {
    let joined = ids
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    format!("id IN({joined})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_produce_empty_query() {
        assert_eq!(PageOptions::new().to_query_string(), "");
    }

    #[test]
    fn paging_parameters_come_first() {
        let options = PageOptions::new()
            .param("jql", "status = Done")
            .max_results(25)
            .start_at(50);
        assert_eq!(
            options.to_query_string(),
            "startAt=50&maxResults=25&jql=status+%3D+Done"
        );
    }

    #[test]
    fn extras_are_ordered_by_key() {
        let options = PageOptions::new().param("validateQuery", "false").param("fields", "summary,status");
        assert_eq!(
            options.to_query_string(),
            "fields=summary%2Cstatus&validateQuery=false"
        );
    }

    #[test]
    fn extras_cannot_shadow_paging_options() {
        let options = PageOptions::new().start_at(5).param("startAt", "999");
        assert_eq!(options.to_query_string(), "startAt=5");
    }

    #[test]
    fn default_max_results_only_fills_gaps() {
        let options = PageOptions::new().start_at(50);
        assert_eq!(
            options.with_default_max_results(DEFAULT_MAX_RESULTS).to_query_string(),
            "startAt=50&maxResults=100"
        );

        let options = PageOptions::new().max_results(3);
        assert_eq!(
            options.with_default_max_results(DEFAULT_MAX_RESULTS).max_results,
            Some(3)
        );
    }

    #[test]
    fn predicate_encodes_like_a_form_value() {
        let predicate = id_in_predicate(&["10546", "10547", "10556"]);
        assert_eq!(predicate, "id IN(10546, 10547, 10556)");
        assert_eq!(
            encode_form(&predicate),
            "id+IN%2810546%2C+10547%2C+10556%29"
        );
    }

    #[test]
    fn single_identifier_predicate() {
        assert_eq!(encode_form(&id_in_predicate(&["1"])), "id+IN%281%29");
    }
}
