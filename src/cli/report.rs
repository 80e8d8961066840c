//! Report formatting and printing utilities.
//!
//! The sync report goes to stdout, per-key progress and errors to stderr.
//! Kept apart from the engine so locsync can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{KeyProgress, LocaleReport, SyncReport, TranslationOutcome};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock(), &mut io::stderr().lock());
}

/// Print a command result to custom writers.
pub fn print_to<W: Write, E: Write>(result: &CommandResult, out: &mut W, err: &mut E) {
    match &result.summary {
        CommandSummary::Sync(report) => print_sync(report, out),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

/// Print one line per key sent to the provider.
pub fn print_progress(progress: &KeyProgress) {
    print_progress_to(progress, &mut io::stderr().lock());
}

pub fn print_progress_to<W: Write>(progress: &KeyProgress, writer: &mut W) {
    let mark = match progress.outcome {
        TranslationOutcome::Translated(_) => SUCCESS_MARK.green(),
        TranslationOutcome::Fallback { .. } => FAILURE_MARK.yellow(),
    };
    let _ = writeln!(
        writer,
        "{} Translating to {} [{}/{}] {}",
        mark,
        progress.locale.bold(),
        progress.position,
        progress.total,
        progress.key
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn print_sync<W: Write>(report: &SyncReport, out: &mut W) {
    let extraction = &report.extraction;
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Found {} {} in {} source {}",
            extraction.keys.len(),
            if extraction.keys.len() == 1 { "key" } else { "keys" },
            extraction.files_scanned,
            if extraction.files_scanned == 1 { "file" } else { "files" }
        )
        .green()
    );

    if !report.reference_added.is_empty() {
        let _ = writeln!(
            out,
            "Keys added to reference ({}): {}",
            report.reference_locale,
            key_list(&report.reference_added)
        );
    }
    if !report.reference_removed.is_empty() {
        let _ = writeln!(
            out,
            "Keys removed from reference ({}): {}",
            report.reference_locale,
            key_list(&report.reference_removed)
        );
    }

    for locale in &report.locales {
        print_locale(locale, out);
    }

    let failures = report.provider_failure_count();
    let locale_count = report.locales.len();
    let synced = format!(
        "Synced {} {}",
        locale_count,
        if locale_count == 1 { "locale" } else { "locales" }
    );
    if failures == 0 {
        let _ = writeln!(out, "{} {}", SUCCESS_MARK.green(), synced.green());
    } else {
        let _ = writeln!(
            out,
            "{} {}, {} key(s) kept the reference text",
            FAILURE_MARK.red(),
            synced.red(),
            failures
        );
    }
}

fn print_locale<W: Write>(locale: &LocaleReport, out: &mut W) {
    if !locale.missing.is_empty() {
        let _ = writeln!(
            out,
            "Keys missing in {}: {}",
            locale.locale.bold(),
            key_list(&locale.missing)
        );
    }
    if !locale.removed.is_empty() {
        let _ = writeln!(
            out,
            "Keys removed in {}: {}",
            locale.locale.bold(),
            key_list(&locale.removed)
        );
    }
    for failed in locale.fallbacks.iter().filter(|f| f.is_provider_failure()) {
        let _ = writeln!(
            out,
            "  {} {}: {}",
            "untranslated".yellow(),
            failed.key,
            failed.cause
        );
    }
}

fn print_init<W: Write, E: Write>(summary: &InitSummary, out: &mut W, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            err,
            "{} {} already exists",
            "error:".bold().red(),
            summary.path.display()
        );
    }
}

fn key_list(keys: &[String]) -> String {
    keys.join(", ")
}
