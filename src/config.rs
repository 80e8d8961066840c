use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::providers::ProviderKind;

pub const CONFIG_FILE_NAME: &str = ".locsyncrc.json";

/// Key-usage patterns recognised in source files. Capture group 1 is the key.
pub const DEFAULT_PATTERNS: &[&str] = &[
    r#"translate\(['"]([\w.]+)['"]\)"#,
    r#"\$translate\(['"]([\w.]+)['"]\)"#,
    r#"translate\(['"]([\w.]+)['"],\s*locale\)"#,
    r#"\$translate\(['"]([\w.]+)['"],\s*locale\)"#,
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    #[serde(default = "default_catalog_file_name")]
    pub catalog_file_name: String,
    #[serde(default = "default_reference_locale")]
    pub reference_locale: String,
    #[serde(default = "default_target_locales")]
    pub target_locales: Vec<String>,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Which translation backend to call, and how to reach it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default)]
    pub name: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Contact address sent to MyMemory for the larger anonymous quota.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_extensions() -> Vec<String> {
    ["js", "ts", "vue"].map(String::from).to_vec()
}

fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_locales_dir() -> String {
    "_locales".to_string()
}

fn default_catalog_file_name() -> String {
    "messages.json".to_string()
}

fn default_reference_locale() -> String {
    "en".to_string()
}

fn default_target_locales() -> Vec<String> {
    ["fr", "es", "de", "pt", "it"].map(String::from).to_vec()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderKind::default(),
            endpoint: None,
            api_key: None,
            email: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            extensions: default_extensions(),
            patterns: default_patterns(),
            locales_dir: default_locales_dir(),
            catalog_file_name: default_catalog_file_name(),
            reference_locale: default_reference_locale(),
            target_locales: default_target_locales(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.patterns {
            let regex = Regex::new(pattern)
                .with_context(|| format!("Invalid regex in 'patterns': \"{}\"", pattern))?;
            if regex.captures_len() < 2 {
                bail!(
                    "Pattern in 'patterns' has no capture group for the key: \"{}\"",
                    pattern
                );
            }
        }

        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        if !is_plain_name(&self.catalog_file_name) {
            bail!(
                "'catalogFileName' must be a plain file name: \"{}\"",
                self.catalog_file_name
            );
        }

        validate_locale("referenceLocale", &self.reference_locale)?;

        let mut seen = HashSet::new();
        for locale in &self.target_locales {
            validate_locale("targetLocales", locale)?;
            if *locale == self.reference_locale {
                bail!(
                    "Reference locale \"{}\" cannot also be listed in 'targetLocales'",
                    locale
                );
            }
            if !seen.insert(locale.as_str()) {
                bail!("Duplicate locale in 'targetLocales': \"{}\"", locale);
            }
        }

        if self.provider.timeout_ms == 0 {
            bail!("'provider.timeoutMs' must be greater than zero");
        }

        Ok(())
    }
}

/// Locale codes become directory names, so they must stay inside `localesDir`.
fn validate_locale(field: &str, locale: &str) -> Result<()> {
    if !is_plain_name(locale) {
        bail!("Invalid locale in '{}': \"{}\"", field, locale);
    }
    Ok(())
}

/// A single path component that names an entry inside its parent directory.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory that relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}

/// Fully resolved settings for one sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub source_root: PathBuf,
    pub extensions: Vec<String>,
    pub patterns: Vec<String>,
    pub locales_dir: PathBuf,
    pub catalog_file_name: String,
    pub reference_locale: String,
    pub target_locales: Vec<String>,
}

impl SyncConfig {
    pub fn resolve(config: &Config, base_dir: &Path) -> Self {
        Self {
            source_root: base_dir.join(&config.source_root),
            extensions: config.extensions.clone(),
            patterns: config.patterns.clone(),
            locales_dir: base_dir.join(&config.locales_dir),
            catalog_file_name: config.catalog_file_name.clone(),
            reference_locale: config.reference_locale.clone(),
            target_locales: config.target_locales.clone(),
        }
    }

    /// `<locales_dir>/<locale>/<catalog_file_name>`
    pub fn catalog_path(&self, locale: &str) -> PathBuf {
        self.locales_dir.join(locale).join(&self.catalog_file_name)
    }

    pub fn reference_catalog_path(&self) -> PathBuf {
        self.catalog_path(&self.reference_locale)
    }
}
