//! Incremental translation of target catalogs.
//!
//! Only keys that are absent from the target catalog, or present with an
//! empty message, are sent to the provider. Existing translations are
//! carried over untouched and keys the reference no longer has are dropped.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use super::catalog::{Catalog, MessageEntry};
use crate::providers::{ProviderError, Translator};

/// Result of translating one message.
#[derive(Debug)]
pub enum TranslationOutcome {
    Translated(String),
    /// The provider failed; `text` is the untranslated reference message.
    Fallback { text: String, cause: ProviderError },
}

impl TranslationOutcome {
    /// The message stored in the target catalog.
    pub fn text(&self) -> &str {
        match self {
            TranslationOutcome::Translated(text) => text,
            TranslationOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TranslationOutcome::Fallback { .. })
    }
}

/// Translate `text` with a single provider call, falling back to `text`
/// itself on failure. Empty text never reaches the provider.
pub fn translate_message(
    translator: &dyn Translator,
    text: &str,
    source: &str,
    target: &str,
) -> TranslationOutcome {
    if text.is_empty() {
        return TranslationOutcome::Fallback {
            text: String::new(),
            cause: ProviderError::EmptySource,
        };
    }
    match translator.translate(text, source, target) {
        Ok(translated) => TranslationOutcome::Translated(translated),
        Err(cause) => TranslationOutcome::Fallback {
            text: text.to_string(),
            cause,
        },
    }
}

/// Progress of one key sent to the provider.
pub struct KeyProgress<'a> {
    pub locale: &'a str,
    pub key: &'a str,
    /// 1-based position among the keys that need translation.
    pub position: usize,
    pub total: usize,
    pub outcome: &'a TranslationOutcome,
}

/// A key whose translation fell back to the reference text.
#[derive(Debug)]
pub struct FailedKey {
    pub key: String,
    pub cause: ProviderError,
}

impl FailedKey {
    /// False when the reference message was empty and nothing was sent.
    pub fn is_provider_failure(&self) -> bool {
        !matches!(self.cause, ProviderError::EmptySource)
    }
}

#[derive(Debug, Default)]
pub struct LocaleReport {
    pub locale: String,
    /// Keys sent to the provider in this run, in reference order.
    pub missing: Vec<String>,
    /// Keys dropped because the reference catalog no longer has them.
    pub removed: Vec<String>,
    /// Subset of `missing` that kept the reference text.
    pub fallbacks: Vec<FailedKey>,
}

impl LocaleReport {
    pub fn has_changes(&self) -> bool {
        !self.missing.is_empty() || !self.removed.is_empty()
    }
}

/// Bring `target` in line with `reference`, in memory.
pub fn translate_catalog(
    reference: &Catalog,
    target: &Catalog,
    reference_locale: &str,
    locale: &str,
    translator: &dyn Translator,
    on_progress: &mut dyn FnMut(&KeyProgress),
) -> (Catalog, LocaleReport) {
    let mut report = LocaleReport {
        locale: locale.to_string(),
        ..Default::default()
    };

    report.removed = target
        .keys()
        .filter(|key| !reference.contains_key(key))
        .map(str::to_string)
        .collect();

    let total = reference
        .keys()
        .filter(|key| target.get(key).is_none_or(MessageEntry::is_empty))
        .count();
    let mut position = 0;

    let mut result = Catalog::new();
    for (key, reference_entry) in reference.iter() {
        let existing = target.get(key);
        if let Some(entry) = existing.filter(|entry| !entry.is_empty()) {
            result.insert(key, entry.clone());
            continue;
        }

        position += 1;
        let outcome = translate_message(
            translator,
            &reference_entry.message,
            reference_locale,
            locale,
        );
        on_progress(&KeyProgress {
            locale,
            key,
            position,
            total,
            outcome: &outcome,
        });

        let extra = existing
            .filter(|entry| !entry.extra.is_empty())
            .unwrap_or(reference_entry)
            .extra
            .clone();
        result.insert(
            key,
            MessageEntry {
                message: outcome.text().to_string(),
                extra,
            },
        );
        report.missing.push(key.to_string());

        match outcome {
            TranslationOutcome::Translated(text) => {
                debug!("[{}] {} -> {:?}", locale, key, text);
            }
            TranslationOutcome::Fallback { cause, .. } => {
                if let ProviderError::EmptySource = cause {
                    debug!("[{}] {} has no reference text yet", locale, key);
                } else {
                    warn!("[{}] Error translating key '{}': {}", locale, key, cause);
                }
                report.fallbacks.push(FailedKey {
                    key: key.to_string(),
                    cause,
                });
            }
        }
    }

    (result, report)
}

/// Load the catalog at `path` (or start empty), translate it against
/// `reference` and write it back.
pub fn sync_target_locale(
    reference: &Catalog,
    reference_locale: &str,
    locale: &str,
    path: &Path,
    translator: &dyn Translator,
    on_progress: &mut dyn FnMut(&KeyProgress),
) -> Result<LocaleReport> {
    let target = Catalog::load_or_default(path)?;
    let (catalog, report) = translate_catalog(
        reference,
        &target,
        reference_locale,
        locale,
        translator,
        on_progress,
    );
    catalog.save(path)?;

    info!(
        "Synced {} with {}: {} missing, {} removed, {} fallbacks",
        path.display(),
        translator.name(),
        report.missing.len(),
        report.removed.len(),
        report.fallbacks.len()
    );

    Ok(report)
}
