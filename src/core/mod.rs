//! Sync engine.
//!
//! - `extract`: scan source files for translation keys
//! - `catalog`: load and atomically save per-locale catalogs
//! - `reconcile`: align the reference catalog with the extracted keys
//! - `translate`: fill gaps in target catalogs through a provider
//! - `pipeline`: run all of the above once

pub mod catalog;
pub mod extract;
pub mod pipeline;
pub mod reconcile;
pub mod translate;

pub use catalog::{Catalog, MessageEntry};
pub use extract::{Extraction, KeyExtractor, SkippedFile};
pub use pipeline::{SyncReport, run_sync};
pub use reconcile::{ReconcileOutcome, reconcile_catalog, reconcile_reference};
pub use translate::{
    FailedKey, KeyProgress, LocaleReport, TranslationOutcome, sync_target_locale,
    translate_catalog, translate_message,
};
