use crate::error::Result;
use crate::output;
use crate::prompt::Prompter;
use crate::state::Controller;

pub async fn list<P: Prompter>(ctl: &mut Controller<P>) -> Result<()> {
    ctl.fetch_projects().await?;
    output::print_projects(ctl.state().projects());
    Ok(())
}

pub async fn show<P: Prompter>(ctl: &mut Controller<P>, id: &str) -> Result<()> {
    ctl.open_project(id).await?;
    output::print_screen(ctl.client(), ctl.state());
    Ok(())
}

pub async fn create<P: Prompter>(ctl: &mut Controller<P>, name: &str) -> Result<()> {
    ctl.open_create_modal();
    ctl.set_new_project_name(name.trim());

    if !ctl.create_project().await? {
        output::print_message("Project name is empty, nothing created.");
        return Ok(());
    }

    output::print_projects_after(
        &format!("Created project \"{}\"", name.trim()),
        ctl.state().projects(),
    );
    Ok(())
}

pub async fn delete<P: Prompter>(ctl: &mut Controller<P>, id: &str, yes: bool) -> Result<()> {
    ctl.open_project(id).await?;
    let name = ctl
        .state()
        .project_data()
        .map(|d| d.project.name.clone())
        .unwrap_or_default();

    if !ctl.delete_project(yes).await? {
        output::print_message("Aborted.");
        return Ok(());
    }

    output::print_projects_after(
        &format!("Deleted project \"{name}\""),
        ctl.state().projects(),
    );
    Ok(())
}
