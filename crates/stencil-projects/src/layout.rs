//! Layout normalization for nested templates
//!
//! A nested fetch (`group/name`) leaves the payload at `group/name/`. The
//! payload is moved to the project directory first, then the `group/`
//! wrapper is removed. The order matters: removing the wrapper earlier
//! would delete the payload with it.

use crate::acquire::wrapper_dir;
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use stencil_core::types::validate_template_identifier;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Move a directory to `to`, replacing whatever is there
///
/// Falls back to copy-then-delete when a plain rename is not possible
/// (for instance across filesystems).
pub fn move_dir(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::layout(format!("{} is not a directory", from)));
    }
    if from.starts_with(to) {
        return Err(Error::layout(format!(
            "cannot move {} into its own ancestor {}",
            from, to
        )));
    }

    if to.exists() {
        debug!("Replacing existing {}", to);
        remove_path(to)?;
    }
    if let Some(parent) = to.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    info!("Moving {} -> {}", from, to);
    if let Err(e) = fs::rename(from, to) {
        debug!("Rename failed ({}), copying instead", e);
        copy_dir_all(from, to)?;
        fs::remove_dir_all(from)?;
    }

    Ok(())
}

/// Resolve `relative` against `root`, refusing anything that is not strictly below it
///
/// Checked on the raw segments: `Path::components` drops interior `.` and
/// would let `a/.` through as `a`.
fn below_root(root: &Utf8Path, relative: &str) -> Result<Utf8PathBuf> {
    validate_template_identifier(relative).map_err(|e| {
        Error::layout(format!("refusing to touch {} below {}: {}", relative, root, e))
    })?;
    Ok(root.join(relative))
}

/// Remove the wrapper directory of a nested template identifier below `root`
///
/// Returns `Ok(false)` without touching the filesystem when the identifier
/// has no separator. A wrapper that would resolve to `root` itself or
/// outside it is refused.
pub fn remove_wrapper(root: &Utf8Path, identifier: &str) -> Result<bool> {
    let Some(wrapper) = wrapper_dir(identifier) else {
        warn!(
            "Template '{}' has no wrapper directory; nothing to remove",
            identifier
        );
        return Ok(false);
    };

    let path = below_root(root, wrapper)?;
    if path.exists() {
        info!("Removing wrapper directory {}", path);
        fs::remove_dir_all(&path)
            .map_err(|e| Error::layout(format!("failed to remove {}: {}", path, e)))?;
    }

    Ok(true)
}

/// Flatten a nested template: move `root/<identifier>` to `root/<project>`, then drop the wrapper
pub fn flatten(root: &Utf8Path, identifier: &str, project_name: &str) -> Result<bool> {
    let payload = below_root(root, identifier)?;
    let target = below_root(root, project_name)?;
    move_dir(&payload, &target)?;
    remove_wrapper(root, identifier)
}

fn remove_path(path: &Utf8Path) -> Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

fn copy_dir_all(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(|e| Error::layout(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| Error::layout(e.to_string()))?;
        let target = to.as_std_path().join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
