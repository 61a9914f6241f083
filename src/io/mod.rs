//! # Reading and writing of calendars
//!
//! Number notations, project files and summaries.
use std::path::Path;

use tracing::warn;

use crate::error::{CalendarError, Result};
use crate::io::project::{COULD_NOT_OPEN, Project};

pub mod number;
pub mod project;
pub mod summary;

/// Import a project from a file.
///
/// Currently only supports the JSON project format.
///
/// # Errors
///
/// `InvalidCalendarState("could not open project")` when the file extension is unknown, or the
/// file can't be read or doesn't hold a valid project.
pub fn import(file_path: &Path) -> Result<Project> {
    match file_path.extension().and_then(|extension| extension.to_str()) {
        Some("json") => Project::load(file_path),
        extension => {
            warn!(path = %file_path.display(), ?extension, "unknown project file extension");
            Err(CalendarError::invalid_state(COULD_NOT_OPEN))
        }
    }
}
