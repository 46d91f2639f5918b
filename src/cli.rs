use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::types::Stage;

#[derive(Parser)]
#[command(name = "vman")]
#[command(about = "Manage project builds, stage tags and build files", version)]
#[command(after_help = "EXAMPLES:
    vman shell                        Browse projects interactively
    vman projects                     List projects
    vman project create \"Alpha\"       Create a project
    vman version create <ID> 1.0.0    Add a build to a project
    vman upload <VERSION_ID> app.zip  Attach a file to a build")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Projects endpoint (overrides VMAN_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse projects and builds interactively
    #[command(after_help = "EXAMPLES:
    vman shell
    vman shell --api-url https://build.local/api/Projects")]
    Shell,
    /// List projects
    #[command(after_help = "EXAMPLES:
    vman projects
    vman projects --json")]
    Projects,
    /// Manage projects
    #[command(after_help = "EXAMPLES:
    vman project show <ID>
    vman project create \"Alpha\"
    vman project delete <ID> --yes")]
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Manage builds of a project
    #[command(after_help = "EXAMPLES:
    vman version create <PROJECT_ID> 2.1.0
    vman version tag <PROJECT_ID> <VERSION_ID> prod")]
    Version {
        #[command(subcommand)]
        action: VersionCommands,
    },
    /// List files attached to a build
    #[command(after_help = "EXAMPLES:
    vman files <VERSION_ID>")]
    Files {
        /// Version ID
        version_id: String,
    },
    /// Upload a file to a build
    #[command(after_help = "EXAMPLES:
    vman upload <VERSION_ID> ./dist/app.zip")]
    Upload(UploadArgs),
    /// Download a file from a build
    #[command(after_help = "EXAMPLES:
    vman download <VERSION_ID> app.zip
    vman download <VERSION_ID> app.zip -o ./artifacts")]
    Download(DownloadArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    vman completions bash > ~/.bash_completion.d/vman
    vman completions zsh > ~/.zfunc/_vman")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Show a project with its builds
    Show {
        /// Project ID
        id: String,
    },
    /// Create a new project
    Create {
        /// Project name
        name: String,
    },
    /// Delete a project
    Delete {
        /// Project ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum VersionCommands {
    /// Add a build to a project
    Create {
        /// Project ID
        project_id: String,

        /// Version number, e.g. 1.0.0 (prompted when omitted)
        number: Option<String>,
    },
    /// Tag a build with a stage (DEV, STAGE, PROD)
    Tag {
        /// Project ID
        project_id: String,

        /// Version ID
        version_id: String,

        /// Stage to tag
        #[arg(value_enum, ignore_case = true)]
        stage: Stage,
    },
}

#[derive(Args)]
pub struct UploadArgs {
    /// Version ID
    pub version_id: String,

    /// Path to file to upload
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// Version ID
    pub version_id: String,

    /// Name of the stored file
    pub filename: String,

    /// Output directory
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
}
