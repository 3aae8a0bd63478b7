use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    Future,
    Active,
    Closed,
    #[serde(other)]
    Unknown,
}

impl SprintState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintState::Future => "future",
            SprintState::Active => "active",
            SprintState::Closed => "closed",
            SprintState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    pub state: SprintState,
    #[serde(
        default,
        deserialize_with = "super::timestamp::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        deserialize_with = "super::timestamp::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        deserialize_with = "super::timestamp::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub complete_date: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_board_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_sprint_has_no_dates() {
        let sprint: Sprint =
            serde_json::from_str(r#"{"id":3,"name":"SBT Sprint 3","state":"future","originBoardId":1}"#)
                .unwrap();
        assert_eq!(sprint.state, SprintState::Future);
        assert!(sprint.start_date.is_none());
        assert!(sprint.end_date.is_none());
        assert_eq!(sprint.origin_board_id, Some(1));
    }

    #[test]
    fn closed_sprint_reads_all_dates() {
        let json = r#"{
            "id": 1,
            "name": "SBT Sprint 1",
            "state": "closed",
            "startDate": "2015-04-07T11:28:15.213+02:00",
            "endDate": "2015-04-21T11:28:00.000+0200",
            "completeDate": "2015-04-20T09:00:00.000+02:00",
            "goal": "Ship it"
        }"#;
        let sprint: Sprint = serde_json::from_str(json).unwrap();
        assert!(sprint.start_date.unwrap() < sprint.end_date.unwrap());
        assert!(sprint.complete_date.is_some());
        assert_eq!(sprint.goal.as_deref(), Some("Ship it"));
    }

    #[test]
    fn bad_date_is_an_error() {
        let json = r#"{"id":1,"name":"x","state":"active","startDate":"yesterday"}"#;
        assert!(serde_json::from_str::<Sprint>(json).is_err());
    }
}
