//! Strongly typed description of the active workspace.

use super::{WorkspaceError, path::normalize};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;

/// Active workspace whose root bounds every user-supplied path.
///
/// The root is always absolute and lexically normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceProperties {
    root: Utf8PathBuf,
}

impl WorkspaceProperties {
    /// Creates workspace properties from a root path.
    ///
    /// Relative roots are resolved against the current working directory.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Configuration`] when the working directory
    /// cannot be determined or is not valid UTF-8.
    pub fn new(root: impl AsRef<Utf8Path>) -> Result<Self, WorkspaceError> {
        let raw = root.as_ref();
        let base = if raw.is_absolute() {
            Utf8PathBuf::new()
        } else {
            current_dir()?
        };
        Ok(Self::with_base(raw, &base))
    }

    /// Creates workspace properties, resolving a relative root against
    /// `base_dir`.
    #[must_use]
    pub fn with_base(root: &Utf8Path, base_dir: &Utf8Path) -> Self {
        Self {
            root: normalize(&base_dir.join(root)),
        }
    }

    /// Binds workspace properties from a JSON object with a `root` entry.
    ///
    /// When `base_dir` is omitted, relative roots resolve against the
    /// current working directory.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Configuration`] when `root` is missing or
    /// not a string.
    pub fn from_json_value(
        value: &Value,
        base_dir: Option<&Utf8Path>,
    ) -> Result<Self, WorkspaceError> {
        let raw_root = value.get("root").ok_or_else(|| {
            WorkspaceError::Configuration(
                "workspace configuration requires a 'root' entry".to_owned(),
            )
        })?;
        let Value::String(root) = raw_root else {
            return Err(WorkspaceError::Configuration(
                "workspace root must be a string".to_owned(),
            ));
        };

        match base_dir {
            Some(base) => Ok(Self::with_base(Utf8Path::new(root), base)),
            None => Self::new(root),
        }
    }

    /// Loads workspace properties from a JSON or YAML configuration file.
    ///
    /// The format follows the extension: `.json`, `.yaml` or `.yml`. The
    /// file may hold the workspace object directly or nest it under a
    /// `workspace` key. Relative roots resolve against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Configuration`] when the file is missing,
    /// has an unsupported extension, does not parse, or lacks a usable
    /// `root`.
    pub fn from_file(file_path: impl AsRef<Utf8Path>) -> Result<Self, WorkspaceError> {
        let path = absolute(file_path.as_ref())?;
        let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
            return Err(WorkspaceError::Configuration(format!(
                "configuration path has no file name: {path}"
            )));
        };
        let format = ConfigFormat::from_extension(path.extension())?;

        let contents = Dir::open_ambient_dir(parent, ambient_authority())
            .and_then(|dir| dir.read_to_string(file_name))
            .map_err(|err| {
                WorkspaceError::Configuration(format!(
                    "cannot read configuration file {path}: {err}"
                ))
            })?;
        let document = format.parse(&contents)?;

        let section = match document.get("workspace") {
            Some(nested @ Value::Object(_)) => nested,
            _ => &document,
        };
        if !section.is_object() {
            return Err(WorkspaceError::Configuration(
                "workspace configuration must be a mapping".to_owned(),
            ));
        }
        Self::from_json_value(section, Some(parent))
    }

    /// Returns the absolute workspace root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Configuration document syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    fn from_extension(extension: Option<&str>) -> Result<Self, WorkspaceError> {
        match extension.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            other => Err(WorkspaceError::Configuration(format!(
                "unsupported configuration format: '{}'",
                other.unwrap_or_default()
            ))),
        }
    }

    fn parse(self, contents: &str) -> Result<Value, WorkspaceError> {
        match self {
            Self::Json => Ok(serde_json::from_str(contents)?),
            Self::Yaml => serde_yaml::from_str(contents).map_err(|err| {
                WorkspaceError::Configuration(format!("invalid YAML configuration: {err}"))
            }),
        }
    }
}

pub(super) fn current_dir() -> Result<Utf8PathBuf, WorkspaceError> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|err| {
        WorkspaceError::Configuration(format!("working directory is not UTF-8: {err}"))
    })
}

pub(super) fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, WorkspaceError> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    Ok(normalize(&current_dir()?.join(path)))
}
