use bridge_core::CONFIG_FILE_NAME;
use bridge_core::config::BridgeConfig;
use bridge_core::error::config::ConfigError;

use std::fs;
use std::path::Path;

use log::LevelFilter;
use tempfile::{TempDir, tempdir};

fn write_config(contents: &str) -> TempDir {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join(CONFIG_FILE_NAME), contents).expect("write config");
    dir
}

fn load(dir: &Path) -> Result<BridgeConfig, ConfigError> {
    BridgeConfig::load(dir)
}

/// **VALUE**: Verifies a full configuration file loads field by field.
#[test]
fn given_full_config_when_loaded_then_all_fields_set() {
    // GIVEN: A config with every field
    let dir = write_config(
        r#"{
            "chromedriver_bin": "/mnt/c/tools/chromedriver.exe",
            "windows_host_ip": "172.20.0.1",
            "windows_host_port": "9516",
            "network_interface": "eth1",
            "log_level": "trace"
        }"#,
    );

    // WHEN: Loading
    let config = load(dir.path()).unwrap();

    // THEN: Every field is read
    assert_eq!(config.chromedriver_bin, "/mnt/c/tools/chromedriver.exe");
    assert_eq!(config.host_ip(), Some("172.20.0.1"));
    assert_eq!(config.host_port(), Some("9516"));
    assert_eq!(config.network_interface, "eth1");
    assert_eq!(config.log_level_filter(), Some(LevelFilter::Trace));
}

/// **VALUE**: Only `chromedriver_bin` is required; everything else defaults.
///
/// **BUG THIS CATCHES**: Would catch a missing `#[serde(default)]` turning the optional
/// fields into hard requirements.
#[test]
fn given_minimal_config_when_loaded_then_optional_fields_default() {
    let dir = write_config(r#"{ "chromedriver_bin": "chromedriver.exe" }"#);

    let config = load(dir.path()).unwrap();

    assert_eq!(config.host_ip(), None);
    assert_eq!(config.host_port(), None);
    assert_eq!(config.network_interface, "eth0");
    assert_eq!(config.log_level_filter(), None);
}

#[test]
fn given_empty_optional_strings_when_loaded_then_treated_as_unset() {
    let dir = write_config(
        r#"{ "chromedriver_bin": "chromedriver.exe", "windows_host_ip": "", "windows_host_port": "", "log_level": "" }"#,
    );

    let config = load(dir.path()).unwrap();

    assert_eq!(config.host_ip(), None);
    assert_eq!(config.host_port(), None);
    assert_eq!(config.log_level_filter(), None);
}

/// **VALUE**: A missing `chromedriver_bin` yields the user-facing setup hint.
///
/// **WHY THIS MATTERS**: This is the first thing every new user hits. The message must tell
/// them which key to set in which file.
#[test]
fn given_missing_chromedriver_bin_when_loaded_then_returns_setup_hint() {
    // GIVEN: A config without the driver path
    let dir = write_config(r#"{ "windows_host_port": "9515" }"#);

    // WHEN: Loading
    let result = load(dir.path());

    // THEN: Validation error with the hint
    match result {
        Err(ConfigError::ValidationError { reason, .. }) => {
            assert_eq!(
                reason,
                "Please setup chromedriver_bin to chromedriver_wsl_config.json."
            );
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn given_no_config_file_when_loaded_then_returns_read_error() {
    let dir = tempdir().expect("temp dir");

    let result = load(dir.path());

    match result {
        Err(ConfigError::ReadError { path, .. }) => {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
        other => panic!("Expected ReadError, got {other:?}"),
    }
}

#[test]
fn given_malformed_json_when_loaded_then_returns_parse_error() {
    let dir = write_config(r#"{ "chromedriver_bin": "#);

    let result = load(dir.path());

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Got {result:?}"
    );
}

/// **BUG THIS CATCHES**: Would catch a typo'd host IP or port surviving until the first
/// proxied request fails.
#[test]
fn given_invalid_overrides_when_validated_then_each_is_rejected() {
    let base = BridgeConfig {
        chromedriver_bin: "chromedriver.exe".to_string(),
        ..BridgeConfig::default()
    };

    let invalid = [
        BridgeConfig {
            windows_host_ip: Some("windows.local".to_string()),
            ..base.clone()
        },
        BridgeConfig {
            windows_host_port: Some("0".to_string()),
            ..base.clone()
        },
        BridgeConfig {
            windows_host_port: Some("95150".to_string()),
            ..base.clone()
        },
        BridgeConfig {
            network_interface: String::new(),
            ..base.clone()
        },
        BridgeConfig {
            log_level: Some("loud".to_string()),
            ..base.clone()
        },
    ];

    assert!(base.validate().is_ok());
    for config in invalid {
        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::ValidationError { .. })
            ),
            "Should reject {config:?}"
        );
    }
}
