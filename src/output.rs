use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::client::ApiClient;
use crate::state::ViewState;
use crate::types::{Project, ProjectDetail, Stage, Version};

/// Global output format setting
static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

/// Print a message (simple object in JSON mode)
pub fn print_message(message: &str) {
    if is_json_output() {
        println!("{}", render_json(&serde_json::json!({ "message": message })));
    } else {
        println!("{message}");
    }
}

pub fn print_success(message: &str) {
    if is_json_output() {
        print_message(message);
    } else {
        println!("{} {message}", "✓".green());
    }
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Version")]
    number: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Stages")]
    stages: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl VersionRow {
    fn new(index: usize, version: &Version) -> Self {
        Self {
            index,
            number: format!("v{}", version.version_number),
            created: format_date(version.created_at.as_deref()),
            stages: stage_tags(version),
            id: version.id.clone(),
        }
    }
}

pub fn stage_tags(version: &Version) -> String {
    Stage::ALL
        .into_iter()
        .map(|stage| stage.tag(version.has_stage(stage)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn render_projects(projects: &[Project], json: bool) -> String {
    if json {
        return render_json(projects);
    }
    if projects.is_empty() {
        return "No projects yet.".bright_black().to_string();
    }

    let rows: Vec<ProjectRow> = projects
        .iter()
        .enumerate()
        .map(|(i, p)| ProjectRow {
            index: i + 1,
            name: p.name.clone(),
            kind: p.display_type().to_string(),
            id: p.id.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Project cards of the list screen.
pub fn print_projects(projects: &[Project]) {
    println!("{}", render_projects(projects, is_json_output()));
}

/// A success line followed by the refreshed list. JSON mode emits only the list.
fn render_projects_after(message: &str, projects: &[Project], json: bool) -> String {
    let list = render_projects(projects, json);
    if json {
        list
    } else {
        format!("{} {message}\n{list}", "✓".green())
    }
}

pub fn print_projects_after(message: &str, projects: &[Project]) {
    println!(
        "{}",
        render_projects_after(message, projects, is_json_output())
    );
}

fn render_detail(detail: &ProjectDetail) -> String {
    let mut out = format!(
        "{}\n{}",
        detail.project.name.bold(),
        format!(
            "{} • {} builds",
            detail.project.display_type(),
            detail.versions.len()
        )
        .bright_black()
    );

    if detail.versions.is_empty() {
        out.push_str(&format!("\n{}", "No builds yet.".bright_black()));
        return out;
    }

    let rows: Vec<VersionRow> = detail
        .versions
        .iter()
        .enumerate()
        .map(|(i, v)| VersionRow::new(i + 1, v))
        .collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    out.push('\n');
    out.push_str(&table);
    out
}

#[derive(Serialize)]
struct FileLink {
    name: String,
    url: String,
}

fn file_links(client: &ApiClient, version_id: &str, files: &[String]) -> Vec<FileLink> {
    files
        .iter()
        .map(|f| FileLink {
            name: f.clone(),
            url: client.download_url(version_id, f).to_string(),
        })
        .collect()
}

fn render_files(client: &ApiClient, version_id: &str, files: &[String], json: bool) -> String {
    if json {
        return render_json(&file_links(client, version_id, files));
    }
    if files.is_empty() {
        return format!("  {}", "Folder is empty".bright_black());
    }
    files
        .iter()
        .map(|file| {
            format!(
                "  {}  {}",
                file,
                client.download_url(version_id, file).as_str().blue()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// File panel of one version, with direct download links.
pub fn print_files(client: &ApiClient, version_id: &str, files: &[String]) {
    println!(
        "{}",
        render_files(client, version_id, files, is_json_output())
    );
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailScreen<'a> {
    project: &'a Project,
    versions: &'a [Version],
    expanded_version_id: Option<&'a str>,
    files: Option<Vec<FileLink>>,
}

fn render_screen(client: &ApiClient, state: &ViewState, json: bool) -> String {
    let Some(detail) = state.project_data() else {
        return render_projects(state.projects(), json);
    };
    let expanded = state
        .expanded_version_id()
        .and_then(|id| detail.version(id));

    if json {
        return render_json(&DetailScreen {
            project: &detail.project,
            versions: &detail.versions,
            expanded_version_id: expanded.map(|v| v.id.as_str()),
            files: expanded.map(|v| file_links(client, &v.id, state.version_files())),
        });
    }

    let mut out = render_detail(detail);
    if let Some(version) = expanded {
        out.push_str(&format!(
            "\nFiles of v{}:\n{}",
            version.version_number,
            render_files(client, &version.id, state.version_files(), false)
        ));
    }
    out
}

/// Render whichever screen the state is on, as one document in JSON mode.
pub fn print_screen(client: &ApiClient, state: &ViewState) {
    println!("{}", render_screen(client, state, is_json_output()));
}

/// Format a timestamp as dd.mm.yyyy, `---` when absent.
pub fn format_date(iso: Option<&str>) -> String {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    let iso = match iso.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return "---".to_string(),
    };

    // Keep the offset the server sent so the calendar date is not shifted
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        dt.format("%d.%m.%Y").to_string()
    } else if let Ok(dt) = iso.parse::<NaiveDateTime>() {
        dt.format("%d.%m.%Y").to_string()
    } else if let Ok(date) = iso.parse::<NaiveDate>() {
        date.format("%d.%m.%Y").to_string()
    } else {
        // Fallback: just the date portion as sent
        iso.split('T').next().unwrap_or(iso).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date(Some("2024-03-01T10:00:00Z")), "01.03.2024");
        assert_eq!(format_date(Some("2024-03-01T10:00:00.1234567")), "01.03.2024");
        assert_eq!(format_date(Some("2024-12-31")), "31.12.2024");
        assert_eq!(format_date(Some("someday")), "someday");
    }

    #[test]
    fn test_format_date_keeps_offset() {
        assert_eq!(format_date(Some("2024-03-01T23:30:00-05:00")), "01.03.2024");
        assert_eq!(format_date(Some("2024-03-02T01:15:00+03:00")), "02.03.2024");
    }

    #[test]
    fn test_format_date_missing() {
        assert_eq!(format_date(None), "---");
        assert_eq!(format_date(Some("")), "---");
    }

    fn client() -> ApiClient {
        let base = url::Url::parse("https://localhost:7140/api/Projects").unwrap();
        ApiClient::new(base, false).unwrap()
    }

    fn open_state() -> ViewState {
        let detail: ProjectDetail = serde_json::from_value(serde_json::json!({
            "project": { "id": 1, "name": "Alpha" },
            "versions": [
                { "id": 10, "versionNumber": "1.0.0", "workRounds": [{ "name": "DEV" }] },
                { "id": 11, "versionNumber": "1.1.0" }
            ]
        }))
        .unwrap();
        let mut state = ViewState::default();
        state.project_opened("1".into(), detail);
        state
    }

    #[test]
    fn test_detail_screen_json_is_one_document() {
        let mut state = open_state();
        state.files_loaded("11".into(), vec!["app.zip".into()]);

        let rendered = render_screen(&client(), &state, true);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["project"]["name"], "Alpha");
        assert_eq!(value["versions"].as_array().unwrap().len(), 2);
        assert_eq!(value["expandedVersionId"], "11");
        assert_eq!(value["files"][0]["name"], "app.zip");
        assert_eq!(
            value["files"][0]["url"],
            "https://localhost:7140/api/Projects/versions/11/download/app.zip"
        );
    }

    #[test]
    fn test_detail_screen_json_collapsed() {
        let rendered = render_screen(&client(), &open_state(), true);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert!(value["expandedVersionId"].is_null());
        assert!(value["files"].is_null());
    }

    #[test]
    fn test_list_after_mutation_json_has_no_message() {
        let projects: Vec<Project> =
            serde_json::from_value(serde_json::json!([{ "id": 1, "name": "Alpha" }])).unwrap();

        let rendered = render_projects_after("Created project \"Alpha\"", &projects, true);
        let parsed: Vec<Project> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, projects);

        colored::control::set_override(false);
        let text = render_projects_after("Created project \"Alpha\"", &projects, false);
        assert!(text.starts_with("✓ Created project \"Alpha\""));
        assert!(text.contains("Alpha"));
    }

    #[test]
    fn test_stage_tags_mark_active() {
        colored::control::set_override(false);
        let version: Version = serde_json::from_str(
            r#"{"id":"v1","versionNumber":"1.0","workRounds":[{"name":"STAGE"}]}"#,
        )
        .unwrap();
        assert_eq!(stage_tags(&version), "DEV STAGE PROD");
        assert!(version.has_stage(Stage::Stage));
    }
}
