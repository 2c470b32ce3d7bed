//! Project command - show the project the app runs

use super::require_dir;
use crate::cli::args::AppArgs;
use crate::error::BuildpackResult;
use crate::project::AppDir;

/// Execute the project command
///
/// Prints nothing when the app has no project to pick.
pub async fn execute(args: AppArgs) -> BuildpackResult<()> {
    require_dir(&args.build_dir)?;

    if let Some(project) = AppDir::new(&args.build_dir).main_project_path()? {
        println!("{}", project.display());
    }
    Ok(())
}
