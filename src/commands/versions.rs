use crate::error::Result;
use crate::output;
use crate::prompt::Prompter;
use crate::state::Controller;
use crate::types::Stage;

pub async fn create<P: Prompter>(
    ctl: &mut Controller<P>,
    project_id: &str,
    number: Option<String>,
) -> Result<()> {
    ctl.open_project(project_id).await?;

    if !ctl.create_version(number).await? {
        output::print_message("No version number given, nothing created.");
        return Ok(());
    }

    output::print_screen(ctl.client(), ctl.state());
    Ok(())
}

pub async fn tag<P: Prompter>(
    ctl: &mut Controller<P>,
    project_id: &str,
    version_id: &str,
    stage: Stage,
) -> Result<()> {
    ctl.open_project(project_id).await?;
    ctl.set_status(version_id, stage).await?;
    output::print_screen(ctl.client(), ctl.state());
    Ok(())
}
