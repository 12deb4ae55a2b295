//! Safe resolution of user-supplied paths inside the workspace.

use super::{WorkspaceError, WorkspaceProperties};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

/// Lexically normalizes a path, folding `.` and `..` components.
///
/// Symlinks are not followed. A `..` at the root stays at the root.
#[must_use]
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalized = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                let at_root = matches!(
                    normalized.components().next_back(),
                    None | Some(Utf8Component::RootDir | Utf8Component::Prefix(_))
                );
                if at_root && normalized.has_root() {
                    continue;
                }
                if at_root || normalized.ends_with("..") {
                    normalized.push("..");
                } else {
                    normalized.pop();
                }
            }
            Utf8Component::Prefix(_) | Utf8Component::RootDir | Utf8Component::Normal(_) => {
                normalized.push(component.as_str());
            }
        }
    }
    normalized
}

/// Resolves a user-supplied path within the workspace.
///
/// Relative paths are joined onto the workspace root. The result must be
/// the root itself or lie beneath it, both lexically and after following
/// any symlinks along the existing part of the path. The returned path is
/// the lexical form.
///
/// # Errors
///
/// Returns [`WorkspaceError::OutsideWorkspace`] when the path escapes the
/// root, including through a symlink or a dangling symlink, and
/// [`WorkspaceError::Missing`] when `must_exist` is set and the resolved
/// path does not exist.
pub fn resolve_workspace_path(
    workspace: &WorkspaceProperties,
    requested: impl AsRef<Utf8Path>,
    must_exist: bool,
) -> Result<Utf8PathBuf, WorkspaceError> {
    let requested_path = requested.as_ref();
    let root = workspace.root();
    let candidate = normalize(&root.join(requested_path));
    let outside = || WorkspaceError::OutsideWorkspace {
        requested: requested_path.to_string(),
        root: root.to_owned(),
    };

    if !candidate.starts_with(root) {
        return Err(outside());
    }

    let real_root = resolve_symlinks(root)?.ok_or_else(outside)?;
    let real_candidate = resolve_symlinks(&candidate)?.ok_or_else(outside)?;
    let Ok(relative) = real_candidate.strip_prefix(&real_root) else {
        return Err(outside());
    };

    if must_exist && !exists_under(&real_root, relative) {
        return Err(WorkspaceError::Missing(candidate));
    }
    Ok(candidate)
}

/// Canonicalizes the longest existing prefix of `path` and appends the
/// remaining components unchanged.
///
/// Returns `None` when a component that exists is a symlink whose target
/// does not.
fn resolve_symlinks(path: &Utf8Path) -> Result<Option<Utf8PathBuf>, WorkspaceError> {
    let mut existing = path;
    let mut tail = Vec::new();
    loop {
        match existing.canonicalize_utf8() {
            Ok(mut resolved) => {
                resolved.extend(tail.iter().rev());
                return Ok(Some(resolved));
            }
            Err(err) if is_absent(&err) => {
                if existing.is_symlink() {
                    return Ok(None);
                }
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Ok(Some(path.to_owned()));
                };
                tail.push(name);
                existing = parent;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn is_absent(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
    )
}

fn exists_under(root: &Utf8Path, relative: &Utf8Path) -> bool {
    let Ok(dir) = Dir::open_ambient_dir(root, ambient_authority()) else {
        return false;
    };
    relative.as_str().is_empty() || dir.exists(relative)
}
