use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

fn setup_project(test: &CliTest) -> Result<()> {
    test.write_file(
        ".locsyncrc.json",
        r#"{
            "targetLocales": ["fr", "de"]
        }"#,
    )?;
    test.write_file(
        "src/popup.ts",
        r#"
const title = translate("popup.title");
const close = translate('popup.close', locale);
"#,
    )?;
    test.write_file(
        "src/components/Options.vue",
        r#"<template>
  <h1>{{ $translate("options.header") }}</h1>
  <p>{{ $translate("popup.title", locale) }}</p>
</template>"#,
    )?;
    test.write_file("src/styles.css", r#"/* translate("css.ignored") */"#)?;
    test.write_file(
        "_locales/en/messages.json",
        r#"{
  "popup.title": { "message": "Tab Manager" },
  "popup.close": { "message": "Close" },
  "options.header": { "message": "Options" },
  "old.key": { "message": "Old" }
}"#,
    )
}

fn message(content: &str, key: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(content).ok()?;
    parsed.get(key)?.get("message")?.as_str().map(str::to_string)
}

#[test]
fn test_sync_reconciles_reference() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = run(test.sync_command())?;
    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);

    assert_snapshot!(test.read_file("_locales/en/messages.json")?, @r#"
    {
      "options.header": {
        "message": "Options"
      },
      "popup.close": {
        "message": "Close"
      },
      "popup.title": {
        "message": "Tab Manager"
      }
    }
    "#);
    assert!(
        output
            .stdout
            .contains("Keys removed from reference (en): old.key")
    );

    Ok(())
}

#[test]
fn test_sync_creates_target_catalogs() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = run(test.sync_command())?;
    assert_eq!(output.code, Some(0));

    for locale in ["fr", "de"] {
        let content = test.read_file(&format!("_locales/{}/messages.json", locale))?;
        assert_eq!(message(&content, "popup.title").as_deref(), Some("Tab Manager"));
        assert_eq!(message(&content, "popup.close").as_deref(), Some("Close"));
        assert_eq!(message(&content, "options.header").as_deref(), Some("Options"));
        assert!(
            output.stdout.contains(&format!(
                "Keys missing in {}: options.header, popup.close, popup.title",
                locale
            )),
            "stdout: {}",
            output.stdout
        );
    }
    assert!(output.stdout.contains("Synced 2 locales"));
    assert!(output.stderr.contains("Translating to fr [1/3] options.header"));

    Ok(())
}

#[test]
fn test_sync_keeps_existing_translations_and_drops_stale_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file(
        "_locales/fr/messages.json",
        r#"{
  "popup.title": { "message": "Gestionnaire d'onglets" },
  "popup.close": { "message": "" },
  "old.key": { "message": "Vieux" }
}"#,
    )?;

    let output = run({
        let mut cmd = test.sync_command();
        cmd.args(["--locale", "fr"]);
        cmd
    })?;
    assert_eq!(output.code, Some(0));

    assert_snapshot!(test.read_file("_locales/fr/messages.json")?, @r#"
    {
      "options.header": {
        "message": "Options"
      },
      "popup.close": {
        "message": "Close"
      },
      "popup.title": {
        "message": "Gestionnaire d'onglets"
      }
    }
    "#);
    assert!(
        output
            .stdout
            .contains("Keys missing in fr: options.header, popup.close")
    );
    assert!(output.stdout.contains("Keys removed in fr: old.key"));
    assert!(!test.root().join("_locales/de").exists());

    Ok(())
}

#[test]
fn test_second_sync_reports_nothing() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    run(test.sync_command())?;
    let before = test.read_file("_locales/fr/messages.json")?;

    let output = run(test.sync_command())?;
    assert_eq!(output.code, Some(0));
    assert!(!output.stdout.contains("Keys missing"));
    assert!(!output.stdout.contains("Keys removed"));
    assert_eq!(test.read_file("_locales/fr/messages.json")?, before);

    Ok(())
}

#[test]
fn test_provider_failure_falls_back_to_reference_text() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".locsyncrc.json",
        r#"{
            "targetLocales": ["fr"],
            "provider": { "name": "mymemory", "endpoint": "http://127.0.0.1:9", "timeoutMs": 2000 }
        }"#,
    )?;
    test.write_file("src/app.js", r#"translate("a.b")"#)?;
    test.write_file(
        "_locales/en/messages.json",
        r#"{ "a.b": { "message": "Hello" } }"#,
    )?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("sync");
        cmd
    })?;

    assert_eq!(output.code, Some(1), "stdout: {}", output.stdout);
    let content = test.read_file("_locales/fr/messages.json")?;
    assert_eq!(message(&content, "a.b").as_deref(), Some("Hello"));
    assert!(output.stdout.contains("Keys missing in fr: a.b"));
    assert!(output.stdout.contains("untranslated a.b: request failed"));
    assert!(output.stdout.contains("1 key(s) kept the reference text"));
    assert!(output.stderr.contains("Error translating key 'a.b'"));

    Ok(())
}

#[test]
fn test_missing_reference_catalog_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app.js", r#"translate("a.b")"#)?;

    let output = run(test.sync_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Reference catalog not found"));
    assert!(!test.root().join("_locales/fr").exists());

    Ok(())
}

#[test]
fn test_no_subcommand_runs_sync() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".locsyncrc.json",
        r#"{ "targetLocales": ["es"], "provider": { "name": "copy" } }"#,
    )?;
    test.write_file("src/app.ts", r#"translate("only.key")"#)?;
    test.write_file("_locales/en/messages.json", "{}")?;

    let output = run(test.command())?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Keys added to reference (en): only.key"));
    let content = test.read_file("_locales/es/messages.json")?;
    assert_eq!(message(&content, "only.key").as_deref(), Some(""));

    Ok(())
}

#[test]
fn test_reference_locale_in_targets_is_rejected() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = run({
        let mut cmd = test.sync_command();
        cmd.args(["--locale", "en"]);
        cmd
    })?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("cannot also be listed in 'targetLocales'"));

    Ok(())
}

#[test]
fn test_custom_layout_from_flags() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/main.js", r#"$translate("custom.key")"#)?;
    test.write_file(
        "i18n/en/messages.json",
        r#"{ "custom.key": { "message": "Custom" } }"#,
    )?;

    let output = run({
        let mut cmd = test.sync_command();
        cmd.args([
            "--source-root",
            "app",
            "--locales-dir",
            "i18n",
            "--locale",
            "it",
        ]);
        cmd
    })?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let content = test.read_file("i18n/it/messages.json")?;
    assert_eq!(message(&content, "custom.key").as_deref(), Some("Custom"));

    Ok(())
}

#[test]
fn test_undecodable_source_leaves_catalogs_untouched() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    let mut legacy = br#"translate("legacy.key") // "#.to_vec();
    legacy.push(0xff);
    std::fs::write(test.root().join("src/legacy.js"), legacy)?;
    let reference = test.read_file("_locales/en/messages.json")?;

    let output = run(test.sync_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Could not scan 1 source file(s)"));
    assert!(output.stderr.contains("legacy.js"));
    assert_eq!(test.read_file("_locales/en/messages.json")?, reference);
    assert!(!test.root().join("_locales/fr").exists());

    Ok(())
}

#[test]
fn test_module_script_keys_are_synced() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/worker.mjs", r#"translate("worker.key")"#)?;
    test.write_file("src/loader.cjs", r#"translate("loader.key")"#)?;
    test.write_file(
        "_locales/en/messages.json",
        r#"{ "worker.key": { "message": "Working" } }"#,
    )?;
    test.write_file(
        "_locales/fr/messages.json",
        r#"{ "worker.key": { "message": "Au travail" } }"#,
    )?;

    let output = run({
        let mut cmd = test.sync_command();
        cmd.args(["--locale", "fr"]);
        cmd
    })?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stdout.contains("Keys added to reference (en): loader.key"));
    assert!(!output.stdout.contains("Keys removed"));
    let content = test.read_file("_locales/fr/messages.json")?;
    assert_eq!(message(&content, "worker.key").as_deref(), Some("Au travail"));

    Ok(())
}
