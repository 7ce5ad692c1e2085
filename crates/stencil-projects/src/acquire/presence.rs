//! Helper tool presence check
//!
//! Looks for the helper executable in the package manager's global install
//! location rather than on `PATH`, so a tool installed by an earlier run is
//! found even when the global bin directory is not on `PATH` yet. The fetch
//! step then runs the executable at the located path.

use super::runner::{CommandRunner, CommandSpec};
use camino::Utf8Path;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The `<package manager> config get prefix` query
pub fn prefix_query(package_manager: &str, cwd: &Utf8Path) -> CommandSpec {
    CommandSpec::new(package_manager, cwd)
        .arg("config")
        .arg("get")
        .arg("prefix")
}

/// Directory holding globally installed executables below a prefix
pub fn global_bin_dir(prefix: &Path) -> PathBuf {
    if cfg!(windows) {
        prefix.to_path_buf()
    } else {
        prefix.join("bin")
    }
}

/// Whether `tool` is installed globally for `package_manager`
///
/// Never fails: a failing prefix query or an unreadable location counts as
/// "not installed".
pub async fn is_tool_installed<R>(
    runner: &R,
    package_manager: &str,
    tool: &str,
    cwd: &Utf8Path,
) -> bool
where
    R: CommandRunner + ?Sized,
{
    locate_tool(runner, package_manager, tool, cwd).await.is_some()
}

/// Full path of `tool` in the global bin directory of `package_manager`, if installed
pub async fn locate_tool<R>(
    runner: &R,
    package_manager: &str,
    tool: &str,
    cwd: &Utf8Path,
) -> Option<PathBuf>
where
    R: CommandRunner + ?Sized,
{
    let query = prefix_query(package_manager, cwd);
    let outcome = match runner.run(&query).await {
        Ok(outcome) if outcome.is_success() => outcome,
        Ok(outcome) => {
            warn!(
                "'{}' exited with code {}; assuming {} is not installed",
                query, outcome.exit_code, tool
            );
            return None;
        }
        Err(e) => {
            warn!("Could not run '{}': {}; assuming {} is not installed", query, e, tool);
            return None;
        }
    };

    let prefix = outcome.stdout.trim();
    if prefix.is_empty() {
        debug!("'{}' printed no prefix", query);
        return None;
    }

    let bin_dir = global_bin_dir(Path::new(prefix));
    match which::which_in(tool, Some(bin_dir.as_os_str()), cwd.as_std_path()) {
        Ok(path) => {
            debug!("Found {} at {}", tool, path.display());
            Some(path)
        }
        Err(e) => {
            debug!("{} not found in {}: {}", tool, bin_dir.display(), e);
            None
        }
    }
}
