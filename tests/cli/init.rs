use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Created .locsyncrc.json"));

    let content = test.read_file(".locsyncrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceRoot"], "src");
    assert_eq!(parsed["localesDir"], "_locales");
    assert_eq!(parsed["referenceLocale"], "en");
    assert_eq!(parsed["provider"]["name"], "mymemory");
    assert!(content.contains("\n  \"sourceRoot\""));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locsyncrc.json", "{}")?;

    let output = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains(".locsyncrc.json already exists"));
    assert_eq!(test.read_file(".locsyncrc.json")?, "{}");

    Ok(())
}
