//! Versioned persistence of application settings.

use super::{
    WorkspaceError, WorkspaceProperties,
    config::{absolute, current_dir},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

/// Schema version written by [`SettingsStore::save`].
pub const CURRENT_VERSION: u64 = 1;

/// Application settings persisted between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    workspace: WorkspaceProperties,
    ffmpeg_path: Option<Utf8PathBuf>,
    compression_presets: Map<String, Value>,
}

impl Settings {
    /// Creates settings for a workspace with no binary override or presets.
    #[must_use]
    pub fn new(workspace: WorkspaceProperties) -> Self {
        Self {
            workspace,
            ffmpeg_path: None,
            compression_presets: Map::new(),
        }
    }

    /// Sets the transcoder binary location.
    #[must_use]
    pub fn with_ffmpeg_path(mut self, ffmpeg_path: impl Into<Utf8PathBuf>) -> Self {
        self.ffmpeg_path = Some(ffmpeg_path.into());
        self
    }

    /// Sets the named compression presets.
    #[must_use]
    pub fn with_compression_presets(mut self, presets: Map<String, Value>) -> Self {
        self.compression_presets = presets;
        self
    }

    /// Returns the active workspace.
    #[must_use]
    pub const fn workspace(&self) -> &WorkspaceProperties {
        &self.workspace
    }

    /// Returns the transcoder binary location, if configured.
    #[must_use]
    pub fn ffmpeg_path(&self) -> Option<&Utf8Path> {
        self.ffmpeg_path.as_deref()
    }

    /// Returns the named compression presets.
    #[must_use]
    pub const fn compression_presets(&self) -> &Map<String, Value> {
        &self.compression_presets
    }

    /// Serializes the settings into the current document schema.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "version": CURRENT_VERSION,
            "workspace": { "root": self.workspace.root().as_str() },
            "ffmpeg_path": self.ffmpeg_path.as_deref().map(Utf8Path::as_str),
            "compression_presets": self.compression_presets,
        })
    }

    /// Binds settings from a current-schema document.
    ///
    /// Relative workspace roots resolve against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Configuration`] when a section has the wrong
    /// shape.
    pub fn from_json(payload: &Value, base_dir: &Utf8Path) -> Result<Self, WorkspaceError> {
        let workspace_section = match payload.get("workspace") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(section @ Value::Object(_)) => section.clone(),
            Some(_) => {
                return Err(WorkspaceError::Configuration(
                    "workspace entry in settings must be a mapping".to_owned(),
                ));
            }
        };
        let workspace = WorkspaceProperties::from_json_value(&workspace_section, Some(base_dir))?;

        let ffmpeg_path = payload
            .get("ffmpeg_path")
            .and_then(Value::as_str)
            .map(Utf8PathBuf::from);

        let compression_presets = match payload.get("compression_presets") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(presets)) => presets.clone(),
            Some(_) => {
                return Err(WorkspaceError::Configuration(
                    "compression_presets must be a mapping".to_owned(),
                ));
            }
        };

        Ok(Self {
            workspace,
            ffmpeg_path,
            compression_presets,
        })
    }

    fn apply(self, changes: SettingsUpdate) -> Self {
        Self {
            workspace: changes.workspace.unwrap_or(self.workspace),
            ffmpeg_path: changes.ffmpeg_path.or(self.ffmpeg_path),
            compression_presets: changes
                .compression_presets
                .unwrap_or(self.compression_presets),
        }
    }
}

/// Partial settings change applied by [`SettingsStore::update`].
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    /// Replacement transcoder binary location.
    pub ffmpeg_path: Option<Utf8PathBuf>,
    /// Replacement workspace.
    pub workspace: Option<WorkspaceProperties>,
    /// Replacement compression presets.
    pub compression_presets: Option<Map<String, Value>>,
}

/// Upgrades a raw settings document to [`CURRENT_VERSION`].
///
/// Documents without a `version` field are treated as version 0.
///
/// # Errors
///
/// Returns [`WorkspaceError::UnsupportedVersion`] when no migration exists
/// for the document's version.
pub fn migrate(payload: Value) -> Result<Value, WorkspaceError> {
    let mut document = payload;
    let mut version = document_version(&document);
    while version < CURRENT_VERSION {
        document = match version {
            0 => migrate_v0_to_v1(&document)?,
            other => return Err(WorkspaceError::UnsupportedVersion(other)),
        };
        version += 1;
    }
    Ok(document)
}

fn document_version(document: &Value) -> u64 {
    document
        .get("version")
        .and_then(Value::as_u64)
        .unwrap_or_default()
}

fn migrate_v0_to_v1(payload: &Value) -> Result<Value, WorkspaceError> {
    let legacy_root = payload
        .get("workspace")
        .filter(|value| !value.is_null())
        .or_else(|| payload.get("workspace_root"));
    let workspace = match legacy_root {
        Some(Value::String(root)) => json!({ "root": root }),
        Some(section @ Value::Object(_)) => section.clone(),
        _ => json!({ "root": current_dir()?.as_str() }),
    };

    let compression_presets = match payload.get("compression_presets") {
        Some(presets @ Value::Object(_)) => presets.clone(),
        _ => Value::Object(Map::new()),
    };

    Ok(json!({
        "version": 1,
        "workspace": workspace,
        "ffmpeg_path": payload.get("ffmpeg_path").cloned().unwrap_or(Value::Null),
        "compression_presets": compression_presets,
    }))
}

/// JSON-file store for [`Settings`] with schema migration on load.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    location: Utf8PathBuf,
}

impl SettingsStore {
    /// Creates a store for the given file, creating its parent directory.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] when the location has no file name or the
    /// parent directory cannot be created.
    pub fn new(location: impl AsRef<Utf8Path>) -> Result<Self, WorkspaceError> {
        let store = Self {
            location: absolute(location.as_ref())?,
        };
        let (parent, _) = store.split_location()?;
        Dir::create_ambient_dir_all(parent, ambient_authority())?;
        Ok(store)
    }

    /// Returns the absolute location of the settings file.
    #[must_use]
    pub fn location(&self) -> &Utf8Path {
        &self.location
    }

    /// Loads settings from disk, migrating older documents.
    ///
    /// When the file is missing and `create_default` is set, default
    /// settings rooted at the file's directory are written and returned.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Missing`] when the file is absent and
    /// defaults were not requested, or another [`WorkspaceError`] when the
    /// document cannot be read or bound.
    pub fn load(&self, create_default: bool) -> Result<Settings, WorkspaceError> {
        let (parent, file_name) = self.split_location()?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;

        if !dir.exists(file_name) {
            if !create_default {
                return Err(WorkspaceError::Missing(self.location.clone()));
            }
            let defaults = Settings::new(WorkspaceProperties::with_base(parent, parent));
            self.save(&defaults)?;
            info!(location = %self.location, "wrote default settings");
            return Ok(defaults);
        }

        let contents = dir.read_to_string(file_name)?;
        let raw: Value = serde_json::from_str(&contents)?;
        let migrated = migrate(raw)?;
        debug!(location = %self.location, "loaded settings");
        Settings::from_json(&migrated, parent)
    }

    /// Writes settings to disk in the current schema.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] when the file cannot be written.
    pub fn save(&self, settings: &Settings) -> Result<(), WorkspaceError> {
        let (parent, file_name) = self.split_location()?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        let body = serde_json::to_string_pretty(&settings.to_json())?;
        dir.write(file_name, body)?;
        Ok(())
    }

    /// Applies a partial change to the stored settings and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] when loading or saving fails.
    pub fn update(&self, changes: SettingsUpdate) -> Result<Settings, WorkspaceError> {
        let updated = self.load(true)?.apply(changes);
        self.save(&updated)?;
        Ok(updated)
    }

    fn split_location(&self) -> Result<(&Utf8Path, &str), WorkspaceError> {
        match (self.location.parent(), self.location.file_name()) {
            (Some(parent), Some(file_name)) => Ok((parent, file_name)),
            _ => Err(WorkspaceError::Configuration(format!(
                "settings location has no file name: {}",
                self.location
            ))),
        }
    }
}
