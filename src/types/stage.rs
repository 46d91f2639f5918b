use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Workflow stages a version can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    /// Development
    Dev,
    /// Staging
    Stage,
    /// Production
    Prod,
}

impl Stage {
    /// Stages in display order.
    pub const ALL: [Stage; 3] = [Stage::Dev, Stage::Stage, Stage::Prod];

    /// Work round name as stored by the server.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "DEV",
            Self::Stage => "STAGE",
            Self::Prod => "PROD",
        }
    }

    /// Tag for terminal output; active stages are highlighted.
    pub fn tag(self, active: bool) -> String {
        let label = self.as_str();
        if !active {
            return label.bright_black().to_string();
        }
        match self {
            Self::Dev => label.blue().bold().to_string(),
            Self::Stage => label.yellow().bold().to_string(),
            Self::Prod => label.green().bold().to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown stage '{s}' (expected DEV, STAGE or PROD)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("prod".parse::<Stage>(), Ok(Stage::Prod));
        assert_eq!(" Stage ".parse::<Stage>(), Ok(Stage::Stage));
        assert!("qa".parse::<Stage>().is_err());
    }

    #[test]
    fn test_posted_as_json_string() {
        assert_eq!(serde_json::to_string(&Stage::Prod.as_str()).unwrap(), r#""PROD""#);
        assert_eq!(serde_json::to_string(&Stage::Dev).unwrap(), r#""DEV""#);
    }
}
