use crate::config::{Config, DEFAULT_API_URL};
use crate::error::{Result, VmError};
use crate::prompt::{Prompter, TerminalPrompter};

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let mut prompter = TerminalPrompter;

    if config_path.exists()
        && !prompter.confirm(&format!(
            "Config file already exists at {}. Overwrite?",
            config_path.display()
        ))
    {
        println!("Aborted.");
        return Ok(());
    }

    println!("Version Manager Configuration");
    println!("=============================\n");

    let api_url = prompter
        .prompt(&format!("Projects endpoint [{DEFAULT_API_URL}]:"))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    // Validate before writing anything
    Config::default().api_url(Some(&api_url))?;

    let accept_invalid_certs =
        prompter.confirm("Accept self-signed certificates (local dev backend)?");

    let config = Config {
        api_url: Some(api_url),
        accept_invalid_certs,
    };
    let contents = toml::to_string(&config)?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| VmError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, contents).map_err(|e| VmError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'vman' commands!");

    Ok(())
}
