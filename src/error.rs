use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Could not open project {id}: {source}")]
    ProjectOpen {
        id: String,
        #[source]
        source: Box<VmError>,
    },

    #[error("Could not delete project. It probably still has related data: {0}")]
    DeleteRejected(#[source] Box<VmError>),

    #[error("No project is open")]
    NoProjectSelected,

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a file name: {0}")]
    InvalidFileName(String),
}

pub type Result<T> = std::result::Result<T, VmError>;
