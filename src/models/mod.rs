mod new_project;
mod project;
mod project_patch;

pub use new_project::NewProject;
pub use project::Project;
pub use project_patch::ProjectPatch;
