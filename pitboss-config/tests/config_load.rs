use pitboss_config::PitbossConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn loads_a_full_file() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
table:
  url: "http://localhost:8080"
webdriver:
  url: "http://localhost:9515"
  headless: true
check:
  bet_amount: "5"
  expected_balance: "100"
  game_area_timeout_ms: 5000
  screenshot_path: "verification/betting_verification.png"
logging:
  stderr: true
  filter: "debug"
"#;
    let p = write_yaml(&tmp, "pitboss.yaml", file_yaml);

    let config = PitbossConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load verification config");

    assert_eq!(config.check.bet_amount, "5");
    assert!(config.logging.stderr);
    assert_eq!(config.logging.filter, "debug");
}

#[test]
#[serial]
fn missing_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let absent = tmp.path().join("does-not-exist.yaml");

    let config = PitbossConfigLoader::new()
        .with_file(absent)
        .load()
        .expect("defaults when file is absent");

    assert_eq!(config.table.url, "http://localhost:8080");
    assert_eq!(
        config.check.screenshot_path,
        "verification/betting_verification.png"
    );
}

#[test]
#[serial]
fn environment_overrides_file_values() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "pitboss.yaml",
        r#"
table:
  url: "http://localhost:8080"
"#,
    );

    temp_env::with_vars(
        [
            ("PITBOSS_TABLE__URL", Some("http://staging:8080")),
            ("PITBOSS_CHECK__GAME_AREA_TIMEOUT_MS", Some("2500")),
        ],
        || {
            let config = PitbossConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("env overlay load");

            assert_eq!(config.table.url, "http://staging:8080");
            assert_eq!(config.check.game_area_timeout_ms, 2500);
        },
    );
}

#[test]
#[serial]
fn env_placeholders_in_yaml_are_expanded() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "pitboss.yaml",
        r#"
table:
  url: "http://${TABLE_HOST}:8080"
"#,
    );

    temp_env::with_var("TABLE_HOST", Some("felt.internal"), || {
        let config = PitbossConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("placeholder expansion load");

        assert_eq!(config.table.url, "http://felt.internal:8080");
    });
}
