//! locsync - keep locale catalogs in sync with source code
//!
//! locsync scans source files for translation-key usages, reconciles the
//! reference locale's `messages.json` against them, and fills the gaps in
//! every other locale through a machine translation provider. Existing
//! translations are never re-sent.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and validation
//! - `core`: Extraction, reconciliation and translation engine
//! - `providers`: Translation backends behind the `Translator` trait

pub mod cli;
pub mod config;
pub mod core;
pub mod providers;
