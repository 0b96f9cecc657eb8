//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Every knob has a default that reproduces the fixed behavior of the
//! betting verifier: the blackjack table at `http://localhost:8080`, a
//! chromedriver endpoint at `http://localhost:9515`, a `"5"` unit bet
//! against an expected `"100"` balance, a 5000ms game-area wait, and a
//! screenshot at `verification/betting_verification.png`. Running with no
//! file and no environment present therefore needs no setup at all; the
//! file and `PITBOSS_`-prefixed variables exist for the rare deployment
//! that points at a different table or driver.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level configuration for a verification run.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PitbossConfig {
    pub table: TableSettings,
    pub webdriver: WebdriverSettings,
    pub check: CheckSettings,
    pub logging: LoggingSettings,
}

/// Where the blackjack table lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub url: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
        }
    }
}

/// How to reach the WebDriver service that launches the browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebdriverSettings {
    pub url: String,
    pub headless: bool,
}

impl Default for WebdriverSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:9515".to_string(),
            headless: true,
        }
    }
}

/// Parameters of the betting check itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    pub bet_amount: String,
    pub expected_balance: String,
    pub game_area_timeout_ms: u64,
    pub screenshot_path: String,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            bet_amount: "5".to_string(),
            expected_balance: "100".to_string(),
            game_area_timeout_ms: 5000,
            screenshot_path: "verification/betting_verification.png".to_string(),
        }
    }
}

/// Tracing sink settings; see `pitboss-common::observability`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub dir: Option<String>,
    pub stderr: bool,
    pub format: String,
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            dir: None,
            stderr: false,
            format: "text".to_string(),
            filter: "info".to_string(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct PitbossConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for PitbossConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PitbossConfigLoader {
    /// Start with the defaults plus `PITBOSS_` env overrides.
    ///
    /// Nested keys use `__` in the variable name, so
    /// `PITBOSS_TABLE__URL=http://staging:8080` overrides `table.url`.
    ///
    /// ```
    /// use pitboss_config::PitbossConfigLoader;
    ///
    /// let config = PitbossConfigLoader::new().load().expect("defaults load");
    /// assert_eq!(config.table.url, "http://localhost:8080");
    /// assert_eq!(config.check.expected_balance, "100");
    /// assert_eq!(config.check.game_area_timeout_ms, 5000);
    /// ```
    pub fn new() -> Self {
        let builder = Config::builder().add_source(
            Environment::with_prefix("PITBOSS")
                .separator("__")
                .try_parsing(true),
        );
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file if it exists; a missing file is fine,
    /// so a bare checkout runs on defaults alone.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet; used by tests and doctests.
    ///
    /// ```
    /// use pitboss_config::PitbossConfigLoader;
    ///
    /// let config = PitbossConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// table:
    ///   url: "http://127.0.0.1:9090"
    /// check:
    ///   bet_amount: "25"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.table.url, "http://127.0.0.1:9090");
    /// assert_eq!(config.check.bet_amount, "25");
    /// // untouched sections keep their defaults
    /// assert_eq!(config.webdriver.url, "http://localhost:9515");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// `${VAR}` placeholders anywhere in the merged tree are expanded
    /// (recursively, with a depth cap so cycles terminate) before the
    /// strongly typed structs are materialised.
    pub fn load(self) -> Result<PitbossConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: PitbossConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("DEALER", Some("lucy"), || {
            let mut v = json!("table-of-${DEALER}");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("table-of-lucy"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("HOST", Some("casino")), ("PORT", Some("8080"))], || {
            let mut v = json!([
                "http://$HOST",
                { "url": "http://${HOST}:${PORT}" },
                5000,
                false,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["http://casino", { "url": "http://casino:8080" }, 5000, false, null])
            );
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("SUIT", Some("spades")),
                ("CARD", Some("ace-of-${SUIT}")),
                ("HAND", Some("holding-${CARD}")),
            ],
            || {
                let mut v = json!("deal=${HAND}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("deal=holding-ace-of-spades"));
            },
        );
    }

    #[test]
    fn stops_on_cycles_and_terminates() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            // the cycle leaves an unresolved placeholder behind
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${NO_SUCH_VAR_ANYWHERE}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${NO_SUCH_VAR_ANYWHERE}"));
    }

    #[test]
    fn defaults_match_the_fixed_script_behavior() {
        let cfg = PitbossConfig::default();
        assert_eq!(cfg.table.url, "http://localhost:8080");
        assert_eq!(cfg.webdriver.url, "http://localhost:9515");
        assert!(cfg.webdriver.headless);
        assert_eq!(cfg.check.bet_amount, "5");
        assert_eq!(cfg.check.expected_balance, "100");
        assert_eq!(cfg.check.game_area_timeout_ms, 5000);
        assert_eq!(
            cfg.check.screenshot_path,
            "verification/betting_verification.png"
        );
    }
}
