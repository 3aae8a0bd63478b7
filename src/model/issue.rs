use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An issue as returned either by an Agile listing or by the search endpoint.
///
/// Listing endpoints produce summary issues (`expanded == false`) whose
/// `fields` may be empty; issues fetched through search carry the complete
/// field set and are marked `expanded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(deserialize_with = "super::id_string")]
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(skip)]
    pub expanded: bool,
}

impl Issue {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn summary(&self) -> Option<&str> {
        self.field("summary").and_then(Value::as_str)
    }

    pub fn status_name(&self) -> Option<&str> {
        self.field("status")
            .and_then(|s| s.get("name"))
            .and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_issue_has_no_fields() {
        let json = r#"{"expand":"operations","id":"10546","self":"https://jira.example.com/rest/agile/1.0/issue/10546","key":"SBT-1"}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, "10546");
        assert_eq!(issue.key, "SBT-1");
        assert!(issue.fields.is_empty());
        assert!(!issue.is_expanded());
        assert_eq!(issue.summary(), None);
    }

    #[test]
    fn reads_summary_and_status() {
        let json = r#"{"id":"1","key":"SBT-1","fields":{"summary":"Fix login","status":{"name":"In Progress"}}}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.summary(), Some("Fix login"));
        assert_eq!(issue.status_name(), Some("In Progress"));
    }

    #[test]
    fn expanded_flag_is_not_serialized() {
        let issue = Issue {
            id: "1".into(),
            key: "SBT-1".into(),
            self_url: None,
            fields: Map::new(),
            expanded: true,
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(!json.contains("expanded"));
        assert!(!json.contains("self"));
    }
}
