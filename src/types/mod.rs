mod id;
mod project;
mod stage;
mod version;

pub use project::{NewProject, Project, ProjectDetail};
pub use stage::Stage;
pub use version::{NewVersion, Version};
