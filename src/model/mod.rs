pub mod board;
pub mod issue;
pub mod page;
pub mod project;
pub mod sprint;
pub mod timestamp;

pub use board::{Board, BoardType};
pub use issue::Issue;
pub use page::{IssuePage, ValuesPage};
pub use project::Project;
pub use sprint::{Sprint, SprintState};

use serde::{Deserialize, Deserializer};

/// Identifiers the tracker sends as strings (`"10546"`), tolerating bare numbers.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
