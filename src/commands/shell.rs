//! Interactive session over the two screens: the project list and one
//! project's detail. Cards and version rows are addressed by their 1-based
//! position or by id.

use std::path::PathBuf;

use colored::Colorize;

use crate::error::{Result, VmError};
use crate::output;
use crate::prompt::{Prompter, TerminalPrompter};
use crate::state::{Controller, Screen, ViewState};
use crate::types::Stage;

const LIST_HELP: &str = "\
  open <N|ID>        open a project
  new [NAME]         create a project
  refresh            reload the project list
  quit               leave";

const DETAIL_HELP: &str = "\
  add [NUMBER]       add a build
  tag <N|ID> <STAGE> tag a build with DEV, STAGE or PROD
  files <N|ID>       show or hide the files of a build
  upload <N|ID> <PATH>  upload a file to a build
  delete             delete this project
  refresh            reload this project
  back               return to the project list
  quit               leave";

#[derive(Debug, PartialEq)]
enum ShellCommand {
    Help,
    Quit,
    Refresh,
    Open(String),
    New(Option<String>),
    Back,
    Delete,
    AddVersion(Option<String>),
    Tag(String, Stage),
    Files(String),
    Upload(String, PathBuf),
}

enum Flow {
    Continue,
    Quit,
}

impl ShellCommand {
    fn available_on(&self, screen: Screen) -> bool {
        match self {
            Self::Help | Self::Quit | Self::Refresh => true,
            Self::Open(_) | Self::New(_) => screen == Screen::List,
            _ => screen == Screen::Detail,
        }
    }
}

/// Parse one input line. `Ok(None)` for a blank line.
fn parse(line: &str) -> std::result::Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
    let required = |s: &str, what: &str| {
        optional(s).ok_or_else(|| format!("missing {what}, see 'help'"))
    };

    let command = match word.to_lowercase().as_str() {
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "refresh" | "ls" => ShellCommand::Refresh,
        "open" => ShellCommand::Open(required(rest, "project")?),
        "new" => ShellCommand::New(optional(rest)),
        "back" => ShellCommand::Back,
        "delete" => ShellCommand::Delete,
        "add" => ShellCommand::AddVersion(optional(rest)),
        "files" => ShellCommand::Files(required(rest, "build")?),
        "tag" => {
            let (version, stage) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: tag <N|ID> <STAGE>".to_string())?;
            ShellCommand::Tag(version.to_string(), stage.parse()?)
        }
        "upload" => {
            let (version, path) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: upload <N|ID> <PATH>".to_string())?;
            ShellCommand::Upload(version.to_string(), PathBuf::from(path.trim()))
        }
        other => return Err(format!("unknown command '{other}', see 'help'")),
    };
    Ok(Some(command))
}

/// A listed project id, else a position on the list screen, else the raw reference.
fn resolve_project(state: &ViewState, reference: &str) -> String {
    if state.projects().iter().any(|p| p.id == reference) {
        return reference.to_string();
    }
    reference
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| state.projects().get(i))
        .map(|p| p.id.clone())
        .unwrap_or_else(|| reference.to_string())
}

/// One of the open project's version ids, else a position in its version list.
fn resolve_version(state: &ViewState, reference: &str) -> Result<String> {
    let versions = state
        .project_data()
        .map(|d| d.versions.as_slice())
        .ok_or(VmError::NoProjectSelected)?;

    if let Some(v) = versions.iter().find(|v| v.id == reference) {
        return Ok(v.id.clone());
    }
    reference
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| versions.get(i))
        .map(|v| v.id.clone())
        .ok_or_else(|| VmError::VersionNotFound(reference.to_string()))
}

async fn execute<P: Prompter>(ctl: &mut Controller<P>, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::Help => {
            let help = match ctl.state().screen() {
                Screen::List => LIST_HELP,
                Screen::Detail => DETAIL_HELP,
            };
            println!("{help}");
            return Ok(Flow::Continue);
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
        ShellCommand::Refresh => match ctl.state().selected_id().map(String::from) {
            Some(id) => ctl.open_project(&id).await?,
            None => ctl.load_projects().await,
        },
        ShellCommand::Open(reference) => {
            let id = resolve_project(ctl.state(), &reference);
            ctl.open_project(&id).await?;
        }
        ShellCommand::New(name) => {
            ctl.open_create_modal();
            let name = name.or_else(|| ctl.prompter().prompt("Project name:"));
            let created = match name {
                Some(name) => {
                    ctl.set_new_project_name(name);
                    ctl.create_project().await
                }
                None => Ok(false),
            };
            ctl.close_create_modal();
            created?;
        }
        ShellCommand::Back => ctl.back(),
        ShellCommand::Delete => {
            if !ctl.delete_project(false).await? {
                return Ok(Flow::Continue);
            }
        }
        ShellCommand::AddVersion(number) => {
            ctl.create_version(number).await?;
        }
        ShellCommand::Tag(reference, stage) => {
            let version_id = resolve_version(ctl.state(), &reference)?;
            ctl.set_status(&version_id, stage).await?;
        }
        ShellCommand::Files(reference) => {
            let version_id = resolve_version(ctl.state(), &reference)?;
            ctl.load_files(&version_id).await?;
        }
        ShellCommand::Upload(reference, path) => {
            let version_id = resolve_version(ctl.state(), &reference)?;
            ctl.upload_file(&version_id, &path).await?;
        }
    }

    output::print_screen(ctl.client(), ctl.state());
    Ok(Flow::Continue)
}

fn prompt_label<P: Prompter>(ctl: &Controller<P>) -> String {
    match ctl.state().project_data() {
        Some(detail) => format!("{} > ", detail.project.name.cyan()),
        None => format!("{} > ", "projects".cyan()),
    }
}

pub async fn run(ctl: &mut Controller<TerminalPrompter>) -> Result<()> {
    ctl.load_projects().await;
    output::print_screen(ctl.client(), ctl.state());
    println!("{}", "Type 'help' for commands.".bright_black());

    loop {
        let label = prompt_label(ctl);
        let Some(line) = ctl.prompter().read_line(&label) else {
            println!();
            break;
        };

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                ctl.prompter().alert(&message);
                continue;
            }
        };

        if !command.available_on(ctl.state().screen()) {
            ctl.prompter()
                .alert("Not available on this screen, see 'help'");
            continue;
        }

        match execute(ctl, command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::debug!(error = ?e, "shell command failed");
                ctl.prompter().alert(&e.to_string());
            }
        }
    }

    Ok(())
}
