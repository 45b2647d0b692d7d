use assessment_config::{Config, ConfigError, ConfigKey, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_report_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.default_recipient, "area.report@example.com");
    assert_eq!(cfg.pdf_scale, 2.0);
    assert!(cfg.lines_per_page > 0);
    assert!(cfg.ui_color_enabled);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.set(ConfigKey::Recipient, "hse@plant.example").expect("recipient");
    cfg.set(ConfigKey::LinesPerPage, "40").expect("lines");
    cfg.set(ConfigKey::ExportDir, "/tmp/reports").expect("dir");

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("absent.json"));

    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "default_recipient": "ops@example.com" }"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.default_recipient, "ops@example.com");
    assert_eq!(loaded.pdf_scale, Config::default_pdf_scale());
    assert!(loaded.export_dir.is_none());
}

#[test]
fn corrupt_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write");

    let err = ConfigManager::new(path).load().expect_err("corrupt");
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn invalid_values_leave_config_unchanged() {
    let mut cfg = Config::default();

    assert!(matches!(
        cfg.set(ConfigKey::Scale, "-1"),
        Err(ConfigError::InvalidValue { key: "scale", .. })
    ));
    assert!(cfg.set(ConfigKey::Recipient, "nobody").is_err());
    assert!(cfg.set(ConfigKey::Color, "maybe").is_err());
    assert_eq!(cfg, Config::default());

    cfg.set(ConfigKey::Color, "off").expect("color");
    assert!(!cfg.ui_color_enabled);
}

#[test]
fn keys_parse_from_user_input() {
    assert_eq!("export-dir".parse::<ConfigKey>().unwrap(), ConfigKey::ExportDir);
    assert_eq!("RECIPIENT".parse::<ConfigKey>().unwrap(), ConfigKey::Recipient);
    assert!(matches!(
        "colour".parse::<ConfigKey>(),
        Err(ConfigError::UnknownKey(_))
    ));
}

#[test]
fn only_report_settings_are_addressable() {
    let keys: Vec<&str> = ConfigKey::ALL.iter().map(|key| key.key()).collect();
    assert_eq!(
        keys,
        ["recipient", "export_dir", "scale", "lines_per_page", "color"]
    );
    assert!(matches!(
        "locale".parse::<ConfigKey>(),
        Err(ConfigError::UnknownKey(_))
    ));
}

#[test]
fn stale_keys_in_saved_file_are_ignored() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "locale": "pt-PT", "pdf_scale": 3.0 }"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.pdf_scale, 3.0);
    assert_eq!(loaded.default_recipient, Config::default_recipient_value());
}
