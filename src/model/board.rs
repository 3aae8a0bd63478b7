use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    Scrum,
    Kanban,
    Simple,
    #[serde(other)]
    Other,
}

impl BoardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardType::Scrum => "scrum",
            BoardType::Kanban => "kanban",
            BoardType::Simple => "simple",
            BoardType::Other => "other",
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub board_type: BoardType,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_agile_board() {
        let json = r#"{"id":1,"self":"https://jira.example.com/rest/agile/1.0/board/1","name":"SBT board","type":"scrum"}"#;
        let board: Board = serde_json::from_str(json).unwrap();
        assert_eq!(board.id, 1);
        assert_eq!(board.name, "SBT board");
        assert_eq!(board.board_type, BoardType::Scrum);
        assert!(board.self_url.unwrap().ends_with("/board/1"));
    }

    #[test]
    fn unknown_board_type_falls_back_to_other() {
        let board: Board = serde_json::from_str(r#"{"id":7,"name":"Ops","type":"roadmap"}"#).unwrap();
        assert_eq!(board.board_type, BoardType::Other);
        assert_eq!(board.board_type.to_string(), "other");
    }
}
