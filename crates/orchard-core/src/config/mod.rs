//! Project configuration: types, loading, and validation

mod loader;
mod types;
mod validation;

pub use loader::{
    find_project, load_project, load_project_from_dir, load_project_reader, render_project,
};
pub use types::*;
pub use validation::validate_project;
