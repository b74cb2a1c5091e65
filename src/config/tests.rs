use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::load_config;
use super::settings::Settings;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.broker.max_connections, 1000);
    assert_eq!(settings.broker.max_message_bytes, 1024 * 1024);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_validation_rejects_unusable_values() {
    let mut settings = Settings::default();
    settings.broker.max_connections = 0;
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.broker.max_message_bytes = 0;
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.server.host.clear();
    assert!(settings.validate().is_err());
}

#[test]
#[serial]
fn test_environment_overrides_defaults() {
    temp_env::with_var("SERVER_HOST", Some("0.0.0.0"), || {
        let settings = load_config().expect("load_config failed");
        assert_eq!(settings.server.host, "0.0.0.0");
        // untouched values fall back to defaults
        assert_eq!(settings.broker.max_connections, 1000);
    });
}

#[test]
#[serial]
fn test_file_overrides_defaults() {
    // load_config picks up config/default.toml relative to the working
    // directory, so run from a temp dir with one written out.
    let tmp = TempDir::new().expect("create tempdir");
    let orig = std::env::current_dir().expect("current_dir");
    std::env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 9000

        [broker]
        max_connections = 10
        max_message_bytes = 4096
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let cfg = load_config().expect("load_config failed");
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.broker.max_connections, 10);
    assert_eq!(cfg.broker.max_message_bytes, 4096);

    std::env::set_current_dir(orig).expect("restore cwd");
}

#[test]
#[serial]
fn test_load_config_rejects_invalid_file() {
    let tmp = TempDir::new().expect("create tempdir");
    let orig = std::env::current_dir().expect("current_dir");
    std::env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    fs::write("config/default.toml", "[broker]\nmax_message_bytes = 0\n")
        .expect("write config file");

    assert!(load_config().is_err());

    std::env::set_current_dir(orig).expect("restore cwd");
}
