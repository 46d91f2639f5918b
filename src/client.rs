use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Result, VmError};
use crate::types::{NewProject, NewVersion, Project, ProjectDetail, Stage};

/// Client for the projects REST collection.
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url, accept_invalid_certs: bool) -> Result<Self> {
        let http = Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self { http, base })
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Base is checked to be hierarchical when the config is resolved.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "api response");

        if !status.is_success() {
            return Err(VmError::Api {
                status: status.as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(self.http.get(url)).await?;
        Ok(response.json().await?)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_json(self.endpoint(&[])).await
    }

    pub async fn get_project(&self, id: &str) -> Result<ProjectDetail> {
        self.get_json(self.endpoint(&[id])).await
    }

    pub async fn create_project(&self, name: &str) -> Result<()> {
        let request = self
            .http
            .post(self.endpoint(&[]))
            .json(&NewProject::named(name));
        self.send(request).await?;
        Ok(())
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        self.send(self.http.delete(self.endpoint(&[id]))).await?;
        Ok(())
    }

    pub async fn create_version(&self, project_id: &str, version_number: &str) -> Result<()> {
        let request = self
            .http
            .post(self.endpoint(&[project_id, "versions"]))
            .json(&NewVersion { version_number });
        self.send(request).await?;
        Ok(())
    }

    /// Post a stage name to the version's rounds. The body is a bare JSON string.
    pub async fn add_work_round(&self, version_id: &str, stage: Stage) -> Result<()> {
        let request = self
            .http
            .post(self.endpoint(&["versions", version_id, "rounds"]))
            .json(&stage.as_str());
        self.send(request).await?;
        Ok(())
    }

    pub async fn list_files(&self, version_id: &str) -> Result<Vec<String>> {
        self.get_json(self.endpoint(&["versions", version_id, "files"]))
            .await
    }

    pub async fn upload_file(&self, version_id: &str, path: &Path) -> Result<()> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| VmError::InvalidFileName(path.display().to_string()))?
            .to_string();

        let data = std::fs::read(path).map_err(|e| VmError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let part = Part::bytes(data)
            .file_name(filename.clone())
            .mime_str(guess_content_type(&filename))?;
        let form = Form::new().part("file", part);

        let request = self
            .http
            .post(self.endpoint(&["versions", version_id, "upload"]))
            .multipart(form);
        self.send(request).await?;
        Ok(())
    }

    /// Direct link to a stored file.
    pub fn download_url(&self, version_id: &str, filename: &str) -> Url {
        self.endpoint(&["versions", version_id, "download", filename])
    }

    pub async fn download_file(&self, version_id: &str, filename: &str) -> Result<Vec<u8>> {
        let url = self.download_url(version_id, filename);
        let response = self.send(self.http.get(url)).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

fn guess_content_type(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "tar" => "application/x-tar",
        "gz" | "tgz" => "application/gzip",
        _ => "application/octet-stream",
    }
}
