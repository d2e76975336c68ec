//! Integration tests for the `filtercheck` binary.
//!
//! Each test launches the binary via `assert_cmd`, writes any required
//! fixture files to a temp file, and asserts on exit code + output.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn filtercheck() -> Command {
    Command::cargo_bin("filtercheck").expect("binary not found")
}

/// Write `contents` to a temporary XML file and return it.
fn temp_xml(contents: &str) -> NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const CONFIG: &str = r#"<Sysmon schemaversion="4.50">
  <EventFiltering>
    <RuleGroup groupRelation="or">
      <ProcessCreate onmatch="include">
        <CommandLine condition="is">notepad.exe</CommandLine>
      </ProcessCreate>
      <ProcessCreate onmatch="exclude">
        <CommandLine condition="contains">notepad</CommandLine>
      </ProcessCreate>
    </RuleGroup>
  </EventFiltering>
</Sysmon>"#;

const EXTRA_CONFIG: &str = r#"<Sysmon>
  <EventFiltering>
    <RuleGroup>
      <NetworkConnect onmatch="include">
        <DestinationPort condition="is any">4444;1337</DestinationPort>
      </NetworkConnect>
    </RuleGroup>
  </EventFiltering>
</Sysmon>"#;

const TESTS: &str = r#"<Tests>
  <ProcessCreate>
    <CommandLine>notepad.exe</CommandLine>
  </ProcessCreate>
  <DNSQuery>
    <QueryName>example.com</QueryName>
  </DNSQuery>
</Tests>"#;

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_reports_dual_membership_and_none() {
    let config = temp_xml(CONFIG);
    let tests = temp_xml(TESTS);

    filtercheck()
        .arg("run")
        .arg("--config")
        .arg(config.path())
        .arg("--tests")
        .arg(tests.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<!--Match type \"include\" : Values included by the configuration-->",
        ))
        .stdout(predicate::str::contains(
            "<!--Match type \"exclude\" : Values excluded by the configuration-->",
        ))
        .stdout(predicate::str::contains(
            "<!--Sysmon event ProcessCreate - EventID 1-->",
        ))
        .stdout(predicate::str::contains(
            "<!--Sysmon event DNSQuery - EventID 22-->",
        ))
        .stdout(predicate::str::contains(
            "<CommandLine>notepad.exe</CommandLine>",
        ))
        .stdout(predicate::str::contains("<QueryName>example.com</QueryName>"));
}

#[test]
fn run_merges_multiple_configs() {
    let config_a = temp_xml(CONFIG);
    let config_b = temp_xml(EXTRA_CONFIG);
    let tests = temp_xml(
        "<Tests><NetworkConnect><DestinationPort>1337</DestinationPort></NetworkConnect></Tests>",
    );

    filtercheck()
        .arg("run")
        .arg("-c")
        .arg(config_a.path())
        .arg("-c")
        .arg(config_b.path())
        .arg("-t")
        .arg(tests.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<DestinationPort>1337</DestinationPort>",
        ))
        .stderr(predicate::str::contains("3 rules"));
}

#[test]
fn run_writes_output_file() {
    let config = temp_xml(CONFIG);
    let tests = temp_xml(TESTS);
    let out = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();

    filtercheck()
        .arg("run")
        .arg("-c")
        .arg(config.path())
        .arg("-t")
        .arg(tests.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();

    let written = std::fs::read_to_string(out.path()).unwrap();
    assert!(written.starts_with("<?xml"));
    assert!(written.contains("<Results>"));
}

#[test]
fn run_emits_json_report() {
    let config = temp_xml(CONFIG);
    let tests = temp_xml(TESTS);

    filtercheck()
        .arg("run")
        .arg("-c")
        .arg(config.path())
        .arg("-t")
        .arg(tests.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"match_type\": \"include\""))
        .stdout(predicate::str::contains("\"event_type\": \"ProcessCreate\""));
}

#[test]
fn run_fails_on_malformed_config() {
    let config = temp_xml("<Sysmon><EventFiltering>");
    let tests = temp_xml(TESTS);

    filtercheck()
        .arg("run")
        .arg("-c")
        .arg(config.path())
        .arg("-t")
        .arg(tests.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error parsing"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_prints_summary() {
    let config = temp_xml(CONFIG);

    filtercheck()
        .arg("validate")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Event types:  1"))
        .stdout(predicate::str::contains("Rule groups:  2"))
        .stdout(predicate::str::contains("Rules:        2"));
}

#[test]
fn validate_fails_on_missing_onmatch() {
    let config = temp_xml(
        "<Sysmon><EventFiltering><RuleGroup><ProcessCreate>\
         <Image>x</Image></ProcessCreate></RuleGroup></EventFiltering></Sysmon>",
    );

    filtercheck()
        .arg("validate")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("onmatch"));
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_dumps_rule_store_json() {
    let config = temp_xml(CONFIG);

    filtercheck()
        .arg("parse")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event_type\": \"ProcessCreate\""))
        .stdout(predicate::str::contains("\"pattern\": \"notepad.exe\""));
}

#[test]
fn parse_fails_on_missing_file() {
    filtercheck()
        .arg("parse")
        .arg("/no/such/file.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error parsing"));
}
