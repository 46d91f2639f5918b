use std::path::{Path, PathBuf};

use crate::cli::{DownloadArgs, UploadArgs};
use crate::error::{Result, VmError};
use crate::output;
use crate::prompt::Prompter;
use crate::state::Controller;

pub async fn list<P: Prompter>(ctl: &mut Controller<P>, version_id: &str) -> Result<()> {
    ctl.load_files(version_id).await?;
    output::print_files(ctl.client(), version_id, ctl.state().version_files());
    Ok(())
}

pub async fn upload<P: Prompter>(ctl: &mut Controller<P>, args: UploadArgs) -> Result<()> {
    if !args.file.is_file() {
        return Err(VmError::FileRead {
            path: args.file.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }
    ctl.upload_file(&args.version_id, &args.file).await
}

pub async fn download<P: Prompter>(ctl: &mut Controller<P>, args: DownloadArgs) -> Result<()> {
    let target = target_path(&args.output, &args.filename)?;

    let bytes = ctl
        .client()
        .download_file(&args.version_id, &args.filename)
        .await?;

    if !args.output.exists() {
        std::fs::create_dir_all(&args.output)?;
    }
    std::fs::write(&target, &bytes)?;

    output::print_success(&format!(
        "Saved {} ({} bytes)",
        target.display(),
        bytes.len()
    ));
    Ok(())
}

/// Local path for a stored file; only the final name component is used.
fn target_path(dir: &Path, filename: &str) -> Result<PathBuf> {
    Path::new(filename)
        .file_name()
        .map(|name| dir.join(name))
        .ok_or_else(|| VmError::InvalidFileName(filename.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::state::tests::ScriptedPrompter;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_target_path_strips_directories() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            target_path(dir, "../../etc/passwd").unwrap(),
            Path::new("/tmp/out/passwd")
        );
        assert_eq!(
            target_path(dir, "app.zip").unwrap(),
            Path::new("/tmp/out/app.zip")
        );
        assert!(target_path(dir, "..").is_err());
    }

    #[tokio::test]
    async fn test_download_writes_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Projects/versions/v1/download/app.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04".to_vec()))
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/api/Projects", server.uri())).unwrap();
        let mut ctl = Controller::new(
            ApiClient::new(base, false).unwrap(),
            ScriptedPrompter::default(),
        );

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("artifacts");
        download(
            &mut ctl,
            DownloadArgs {
                version_id: "v1".into(),
                filename: "app.zip".into(),
                output: output.clone(),
            },
        )
        .await
        .unwrap();

        assert_eq!(std::fs::read(output.join("app.zip")).unwrap(), b"PK\x03\x04");
    }
}
