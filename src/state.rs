//! Client-side view state and the controller that mediates every API call.
//!
//! `ViewState` only changes through the named transitions below, each applied
//! after the matching request has settled. Failed foreground operations leave
//! the state exactly as it was; background refreshes log and keep stale data.

use std::path::Path;

use crate::client::ApiClient;
use crate::error::{Result, VmError};
use crate::prompt::Prompter;
use crate::types::{Project, ProjectDetail, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Detail,
}

/// The selected project and its loaded detail, always present together.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenProject {
    pub id: String,
    pub detail: ProjectDetail,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ViewState {
    projects: Vec<Project>,
    open: Option<OpenProject>,
    create_modal_open: bool,
    new_project_name: String,
    /// At most one version is expanded; setting a new id collapses the previous one.
    expanded_version_id: Option<String>,
    version_files: Vec<String>,
}

impl ViewState {
    pub fn screen(&self) -> Screen {
        if self.open.is_some() {
            Screen::Detail
        } else {
            Screen::List
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.open.as_ref().map(|open| open.id.as_str())
    }

    pub fn project_data(&self) -> Option<&ProjectDetail> {
        self.open.as_ref().map(|open| &open.detail)
    }

    pub fn is_create_modal_open(&self) -> bool {
        self.create_modal_open
    }

    pub fn new_project_name(&self) -> &str {
        &self.new_project_name
    }

    pub fn expanded_version_id(&self) -> Option<&str> {
        self.expanded_version_id.as_deref()
    }

    pub fn version_files(&self) -> &[String] {
        &self.version_files
    }

    pub fn is_expanded(&self, version_id: &str) -> bool {
        self.expanded_version_id.as_deref() == Some(version_id)
    }

    pub fn projects_loaded(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    /// Re-opening the already selected project keeps the file panel.
    pub fn project_opened(&mut self, id: String, detail: ProjectDetail) {
        if self.selected_id() != Some(id.as_str()) {
            self.expanded_version_id = None;
        }
        self.open = Some(OpenProject { id, detail });
    }

    pub fn back(&mut self) {
        self.open = None;
        self.expanded_version_id = None;
    }

    pub fn project_deleted(&mut self) {
        self.back();
    }

    pub fn open_create_modal(&mut self) {
        self.create_modal_open = true;
    }

    pub fn set_new_project_name(&mut self, name: impl Into<String>) {
        self.new_project_name = name.into();
    }

    pub fn close_create_modal(&mut self) {
        self.create_modal_open = false;
    }

    pub fn project_created(&mut self) {
        self.create_modal_open = false;
        self.new_project_name.clear();
    }

    pub fn files_loaded(&mut self, version_id: String, files: Vec<String>) {
        self.version_files = files;
        self.expanded_version_id = Some(version_id);
    }

    /// Cached file names are kept; the next expansion fetches again.
    pub fn files_collapsed(&mut self) {
        self.expanded_version_id = None;
    }
}

pub struct Controller<P> {
    client: ApiClient,
    state: ViewState,
    prompter: P,
}

impl<P: Prompter> Controller<P> {
    pub fn new(client: ApiClient, prompter: P) -> Self {
        Self {
            client,
            state: ViewState::default(),
            prompter,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn prompter(&mut self) -> &mut P {
        &mut self.prompter
    }

    fn selected_id(&self) -> Result<String> {
        self.state
            .selected_id()
            .map(String::from)
            .ok_or(VmError::NoProjectSelected)
    }

    pub async fn fetch_projects(&mut self) -> Result<()> {
        let projects = self.client.list_projects().await?;
        self.state.projects_loaded(projects);
        Ok(())
    }

    /// Background refresh of the project list. Failures keep the previous list.
    pub async fn load_projects(&mut self) {
        if let Err(e) = self.fetch_projects().await {
            tracing::warn!(error = %e, "failed to load projects");
        }
    }

    pub async fn open_project(&mut self, id: &str) -> Result<()> {
        let detail = self
            .client
            .get_project(id)
            .await
            .map_err(|e| VmError::ProjectOpen {
                id: id.to_string(),
                source: Box::new(e),
            })?;
        self.state.project_opened(id.to_string(), detail);
        Ok(())
    }

    pub fn back(&mut self) {
        self.state.back();
    }

    pub fn open_create_modal(&mut self) {
        self.state.open_create_modal();
    }

    pub fn set_new_project_name(&mut self, name: impl Into<String>) {
        self.state.set_new_project_name(name);
    }

    pub fn close_create_modal(&mut self) {
        self.state.close_create_modal();
    }

    /// Create a project from the pending name. Returns false when there is no name.
    pub async fn create_project(&mut self) -> Result<bool> {
        let name = self.state.new_project_name().to_string();
        if name.is_empty() {
            return Ok(false);
        }

        self.client.create_project(&name).await?;
        self.state.project_created();
        self.load_projects().await;
        Ok(true)
    }

    /// Delete the open project after confirmation. Returns false when declined.
    pub async fn delete_project(&mut self, confirmed: bool) -> Result<bool> {
        let id = self.selected_id()?;

        if !confirmed
            && !self
                .prompter
                .confirm("Delete this project permanently? This cannot be undone.")
        {
            return Ok(false);
        }

        self.client
            .delete_project(&id)
            .await
            .map_err(|e| VmError::DeleteRejected(Box::new(e)))?;
        self.state.project_deleted();
        self.load_projects().await;
        Ok(true)
    }

    /// Add a version to the open project, prompting when no number is given.
    pub async fn create_version(&mut self, number: Option<String>) -> Result<bool> {
        let id = self.selected_id()?;

        let number = match number {
            Some(number) => number,
            None => match self.prompter.prompt("Version number (e.g. 1.0.0):") {
                Some(number) => number,
                None => return Ok(false),
            },
        };
        let number = number.trim();
        if number.is_empty() {
            return Ok(false);
        }

        self.client.create_version(&id, number).await?;
        self.open_project(&id).await?;
        Ok(true)
    }

    pub async fn set_status(&mut self, version_id: &str, stage: Stage) -> Result<()> {
        let id = self.selected_id()?;
        self.client.add_work_round(version_id, stage).await?;
        self.open_project(&id).await
    }

    /// Toggle the file panel of a version. Expanding always fetches.
    pub async fn load_files(&mut self, version_id: &str) -> Result<()> {
        if self.state.is_expanded(version_id) {
            self.state.files_collapsed();
            return Ok(());
        }
        self.refresh_files(version_id).await
    }

    async fn refresh_files(&mut self, version_id: &str) -> Result<()> {
        let files = self.client.list_files(version_id).await?;
        self.state.files_loaded(version_id.to_string(), files);
        Ok(())
    }

    pub async fn upload_file(&mut self, version_id: &str, path: &Path) -> Result<()> {
        self.client.upload_file(version_id, path).await?;

        if self.state.is_expanded(version_id) {
            if let Err(e) = self.refresh_files(version_id).await {
                tracing::warn!(error = %e, version_id, "failed to refresh file list");
            }
        }

        self.prompter.notify("File uploaded");
        Ok(())
    }
}
