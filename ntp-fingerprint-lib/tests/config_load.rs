mod helpers;

use std::io::Write;

use helpers::TestResult;
use ntp_fingerprint_lib::config::{load_from_path, validate, Config, SignatureConfig};
use ntp_fingerprint_lib::{FingerprintError, ProbeId, ProbeOutcome, ResponseVector};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> TestResult<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{contents}")?;
    Ok(file)
}

#[test]
fn test_empty_file_uses_defaults() -> TestResult {
    let file = write_config("")?;
    let config = load_from_path(file.path())?;

    assert_eq!(config, Config::default());
    assert_eq!(config.probe.timeout_secs, 2);
    assert_eq!(config.probe.port, 123);
    assert_eq!(config.probe.concurrency, 1);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.show_target);
    assert!(config.signatures.is_empty());
    Ok(())
}

#[test]
fn test_loads_probe_and_logging_sections() -> TestResult {
    let file = write_config(
        r#"
[probe]
timeout_secs = 5
port = 10123
concurrency = 8

[logging]
level = "debug"
show_target = true
"#,
    )?;
    let config = load_from_path(file.path())?;

    assert_eq!(config.probe.timeout_secs, 5);
    assert_eq!(config.probe.timeout().as_secs(), 5);
    assert_eq!(config.probe.port, 10123);
    assert_eq!(config.probe.concurrency, 8);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.show_target);
    Ok(())
}

#[test]
fn test_extra_signatures_follow_builtin_table() -> TestResult {
    let file = write_config(
        r#"
[[signatures]]
name = "lab-appliance"
expect = { basic = true, short = true, broadcast = false }
"#,
    )?;
    let config = load_from_path(file.path())?;
    let table = config.fingerprint_table()?;

    let last = table.iter().last().ok_or("table is empty")?;
    assert_eq!(last.name(), "lab-appliance");
    assert_eq!(
        last.expected(),
        &[
            (ProbeId::Basic, ProbeOutcome::Reply),
            (ProbeId::Short, ProbeOutcome::Reply),
            (ProbeId::Broadcast, ProbeOutcome::Silent),
        ]
    );

    let vector = ResponseVector::from_bits(&[1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(table.identify(&vector).name(), Some("lab-appliance"));
    Ok(())
}

#[test]
fn test_rejects_zero_timeout() -> TestResult {
    let file = write_config("[probe]\ntimeout_secs = 0\n")?;
    let err = load_from_path(file.path()).err().ok_or("zero timeout accepted")?;
    assert!(matches!(err, FingerprintError::Config(ref msg) if msg.contains("timeout_secs")));
    Ok(())
}

#[test]
fn test_rejects_unknown_probe_name() -> TestResult {
    let file = write_config(
        r#"
[[signatures]]
name = "typo"
expect = { basics = true }
"#,
    )?;
    let err = load_from_path(file.path()).err().ok_or("unknown probe accepted")?;
    assert!(matches!(err, FingerprintError::Config(ref msg) if msg.contains("basics")));
    Ok(())
}

#[test]
fn test_rejects_malformed_toml() -> TestResult {
    let file = write_config("[probe\ntimeout_secs = 2")?;
    assert!(matches!(load_from_path(file.path()), Err(FingerprintError::Config(_))));
    Ok(())
}

#[test]
fn test_missing_file_is_config_error() {
    let result = load_from_path("/nonexistent/ntp-fingerprint.toml");
    assert!(matches!(result, Err(FingerprintError::Config(_))));
}

#[test]
fn test_validate_bounds() {
    let mut config = Config::default();
    assert!(validate(&config).is_ok());

    config.probe.concurrency = 0;
    assert!(validate(&config).is_err());
    config.probe.concurrency = 65;
    assert!(validate(&config).is_err());
    config.probe.concurrency = 64;
    assert!(validate(&config).is_ok());

    config.probe.port = 0;
    assert!(validate(&config).is_err());
    config.probe.port = 123;

    config.signatures.push(SignatureConfig { name: "  ".to_string(), expect: Default::default() });
    assert!(validate(&config).is_err());
    config.signatures[0].name = "empty".to_string();
    assert!(validate(&config).is_err(), "signature without expectations");
}
