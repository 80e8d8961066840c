//! Reference catalog reconciliation.
//!
//! After reconciliation the reference catalog holds exactly the keys found
//! in source code. New keys get an empty message; keys no longer referenced
//! are dropped.

use std::{collections::BTreeSet, path::Path};

use anyhow::{Result, bail};
use tracing::info;

use super::catalog::{Catalog, MessageEntry};

#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub catalog: Catalog,
    /// Keys inserted with an empty message.
    pub added: Vec<String>,
    /// Keys deleted because no source file references them any more.
    pub removed: Vec<String>,
}

/// Bring `catalog`'s key set in line with `keys`, in memory.
///
/// Returns `(added, removed)`, both in alphabetical order.
pub fn reconcile_catalog(
    catalog: &mut Catalog,
    keys: &BTreeSet<String>,
) -> (Vec<String>, Vec<String>) {
    let mut added = Vec::new();
    for key in keys {
        if !catalog.contains_key(key) {
            catalog.insert(key.clone(), MessageEntry::new(""));
            added.push(key.clone());
        }
    }

    let removed: Vec<String> = catalog
        .keys()
        .filter(|key| !keys.contains(*key))
        .map(str::to_string)
        .collect();
    for key in &removed {
        catalog.remove(key);
    }

    (added, removed)
}

/// Reconcile the reference catalog stored at `path` and write it back.
///
/// The file must already exist.
pub fn reconcile_reference(path: &Path, keys: &BTreeSet<String>) -> Result<ReconcileOutcome> {
    if !path.is_file() {
        bail!("Reference catalog not found: {}", path.display());
    }

    let mut catalog = Catalog::load(path)?;
    let (added, removed) = reconcile_catalog(&mut catalog, keys);
    catalog.save(path)?;

    info!(
        "Reconciled {}: {} keys, {} added, {} removed",
        path.display(),
        catalog.len(),
        added.len(),
        removed.len()
    );

    Ok(ReconcileOutcome {
        catalog,
        added,
        removed,
    })
}
