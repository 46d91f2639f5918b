use serde::{Deserialize, Serialize};

use super::id::deserialize_id;
use super::Version;

const DEFAULT_PROJECT_TYPE: &str = "Standard Application";

/// Project type sent with every newly created project.
pub const NEW_PROJECT_TYPE: &str = "Application";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project_type: Option<String>,
}

impl Project {
    /// Project type for display, falling back to the standard label.
    pub fn display_type(&self) -> &str {
        match self.project_type.as_deref() {
            Some(kind) if !kind.is_empty() => kind,
            _ => DEFAULT_PROJECT_TYPE,
        }
    }
}

/// A project together with its full version history, fetched as a unit.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub project: Project,
    #[serde(default)]
    pub versions: Vec<Version>,
}

impl ProjectDetail {
    pub fn version(&self, id: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.id == id)
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewProject<'a> {
    pub name: &'a str,
    pub project_type: &'a str,
}

impl<'a> NewProject<'a> {
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            project_type: NEW_PROJECT_TYPE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_type_defaults() {
        let mut project = Project {
            id: "1".into(),
            name: "Alpha".into(),
            project_type: None,
        };
        assert_eq!(project.display_type(), "Standard Application");

        project.project_type = Some(String::new());
        assert_eq!(project.display_type(), "Standard Application");

        project.project_type = Some("Library".into());
        assert_eq!(project.display_type(), "Library");
    }

    #[test]
    fn test_new_project_body() {
        let body = serde_json::to_value(NewProject::named("Alpha")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "name": "Alpha", "projectType": "Application" })
        );
    }

    #[test]
    fn test_detail_without_versions() {
        let detail: ProjectDetail =
            serde_json::from_str(r#"{"project":{"id":"p1","name":"Alpha"}}"#).unwrap();
        assert!(detail.versions.is_empty());
        assert_eq!(detail.project.project_type, None);
    }

    #[test]
    fn test_numeric_ids() {
        let detail: ProjectDetail = serde_json::from_str(
            r#"{
                "project": {"id": 3, "name": "Alpha", "projectType": "Application"},
                "versions": [{"id": 17, "versionNumber": "1.0.0", "workRounds": [{"id": 5, "name": "DEV"}]}]
            }"#,
        )
        .unwrap();
        assert_eq!(detail.project.id, "3");
        assert_eq!(detail.versions[0].id, "17");
        assert!(detail.version("17").is_some());
    }
}
