//! Per-locale message catalogs.
//!
//! A catalog is a JSON object mapping translation keys to entries of the
//! form `{"message": "..."}`. Keys are kept in a `BTreeMap`, so every save
//! writes them in alphabetical order.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

/// A single localizable message.
///
/// An empty `message` means the key still needs authoring or translation.
/// Fields other than `message` (`description`, `placeholders`, ...) are kept
/// in their original relative order. `message` is always written first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extra: Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, MessageEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }

    /// Load a catalog file, or start from an empty catalog if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Pretty JSON with 2-space indentation and a trailing newline.
    ///
    /// Non-ASCII characters are written literally.
    pub fn to_json_string(&self) -> Result<String> {
        let content =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize catalog")?;
        Ok(format!("{}\n", content))
    }

    /// Write the catalog to `path`, replacing any existing file.
    ///
    /// The content goes to a temporary file in the same directory which is
    /// then renamed over `path`, so readers see either the old or the new
    /// catalog, never a partial one.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

        let content = self.to_json_string()?;

        let mut file = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in: {}", parent.display()))?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.as_file().sync_all())
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

        let permissions = fs::metadata(path)
            .ok()
            .map(|meta| meta.permissions())
            .or_else(new_file_permissions);
        if let Some(permissions) = permissions {
            fs::set_permissions(file.path(), permissions)
                .with_context(|| format!("Failed to set permissions for: {}", path.display()))?;
        }

        file.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace catalog: {}", path.display()))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&MessageEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: MessageEntry) -> Option<MessageEntry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn remove(&mut self, key: &str) -> Option<MessageEntry> {
        self.entries.remove(key)
    }

    /// Keys in alphabetical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, MessageEntry)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, MessageEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
