use serde::{Deserialize, Deserializer, Serialize};

use super::id::deserialize_id;
use super::Stage;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub version_number: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub work_rounds: Vec<WorkRound>,
}

impl Version {
    /// Whether the stage is active, tested by work round name.
    pub fn has_stage(&self, stage: Stage) -> bool {
        self.work_rounds.iter().any(|r| r.name == stage.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorkRound {
    pub name: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewVersion<'a> {
    pub version_number: &'a str,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<WorkRound>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<WorkRound>>::deserialize(deserializer)?.unwrap_or_default())
}
