//! The full sync run: extract keys, reconcile the reference catalog, then
//! translate every target locale in turn.

use anyhow::{Result, bail};
use tracing::info;

use super::{
    extract::{Extraction, KeyExtractor},
    reconcile::reconcile_reference,
    translate::{KeyProgress, LocaleReport, sync_target_locale},
};
use crate::config::SyncConfig;
use crate::providers::Translator;

#[derive(Debug, Default)]
pub struct SyncReport {
    pub reference_locale: String,
    pub extraction: Extraction,
    pub reference_added: Vec<String>,
    pub reference_removed: Vec<String>,
    pub locales: Vec<LocaleReport>,
}

impl SyncReport {
    pub fn fallback_count(&self) -> usize {
        self.locales.iter().map(|l| l.fallbacks.len()).sum()
    }

    /// Fallbacks caused by the provider, excluding empty reference messages.
    pub fn provider_failure_count(&self) -> usize {
        self.locales
            .iter()
            .flat_map(|l| &l.fallbacks)
            .filter(|f| f.is_provider_failure())
            .count()
    }

    pub fn has_changes(&self) -> bool {
        !self.reference_added.is_empty()
            || !self.reference_removed.is_empty()
            || self.locales.iter().any(LocaleReport::has_changes)
    }
}

pub fn run_sync(
    config: &SyncConfig,
    translator: &dyn Translator,
    on_progress: &mut dyn FnMut(&KeyProgress),
) -> Result<SyncReport> {
    let extractor = KeyExtractor::new(&config.patterns, &config.extensions)?;
    let extraction = extractor.extract(&config.source_root)?;
    info!(
        "Found {} keys in {} files under {}",
        extraction.keys.len(),
        extraction.files_scanned,
        config.source_root.display()
    );
    // Keys used only in an unscanned file would look stale and be deleted
    // from every catalog.
    if !extraction.skipped.is_empty() {
        let files = extraction
            .skipped
            .iter()
            .map(|skipped| format!("{} ({})", skipped.path.display(), skipped.reason))
            .collect::<Vec<_>>()
            .join(", ");
        bail!(
            "Could not scan {} source file(s), no catalog was changed: {}",
            extraction.skipped.len(),
            files
        );
    }

    let reference =
        reconcile_reference(&config.reference_catalog_path(), &extraction.keys)?;

    let mut locales = Vec::with_capacity(config.target_locales.len());
    for locale in &config.target_locales {
        let report = sync_target_locale(
            &reference.catalog,
            &config.reference_locale,
            locale,
            &config.catalog_path(locale),
            translator,
            on_progress,
        )?;
        locales.push(report);
    }

    Ok(SyncReport {
        reference_locale: config.reference_locale.clone(),
        extraction,
        reference_added: reference.added,
        reference_removed: reference.removed,
        locales,
    })
}
