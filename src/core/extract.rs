//! Translation key extraction from source files.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file the extractor could not scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Keys found in a source tree.
#[derive(Debug, Default)]
pub struct Extraction {
    pub keys: BTreeSet<String>,
    pub files_scanned: usize,
    pub skipped: Vec<SkippedFile>,
}

pub struct KeyExtractor {
    patterns: Vec<Regex>,
    extensions: Vec<String>,
}

impl KeyExtractor {
    /// Compile the key patterns. Capture group 1 of each pattern is the key.
    pub fn new(patterns: &[String], extensions: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid key pattern: \"{}\"", p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
            extensions: extensions.to_vec(),
        })
    }

    /// Add every key referenced in `content` to `keys`.
    pub fn extract_from_text(&self, content: &str, keys: &mut BTreeSet<String>) {
        for pattern in &self.patterns {
            for captures in pattern.captures_iter(content) {
                if let Some(key) = captures.get(1) {
                    keys.insert(key.as_str().to_string());
                }
            }
        }
    }

    /// Walk `root` recursively and collect keys from every file whose name
    /// ends with a recognised extension.
    ///
    /// Files that cannot be read as UTF-8 text are skipped and reported in
    /// [`Extraction::skipped`]; callers decide whether that is fatal.
    pub fn extract(&self, root: &Path) -> Result<Extraction> {
        if !root.is_dir() {
            bail!("Source root is not a directory: {}", root.display());
        }

        let mut extraction = Extraction::default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    warn!("Cannot access path {}: {}", path.display(), e);
                    extraction.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_scannable_file(path) {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(content) => {
                    let before = extraction.keys.len();
                    self.extract_from_text(&content, &mut extraction.keys);
                    extraction.files_scanned += 1;
                    debug!(
                        "Scanned {} ({} new keys)",
                        path.display(),
                        extraction.keys.len() - before
                    );
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    extraction.skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(extraction)
    }

    /// Plain suffix match on the file name, so `js` also picks up `.mjs` and
    /// `.cjs` files. A leading dot in the configured extension narrows it.
    fn is_scannable_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.extensions.iter().any(|ext| name.ends_with(ext.as_str())))
    }
}
