use usher::config::Config;
use usher::constants::SIDEBAR_DEFAULT_WIDTH;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.ui.default_section, "events");
    assert!(config.ui.mouse_enabled);
    assert_eq!(config.ui.sidebar_width, SIDEBAR_DEFAULT_WIDTH);
    assert_eq!(config.display.date_format, "%Y-%m-%d");
    assert!(config.display.show_clicks);
    assert_eq!(config.api.url_env, "USHER_API_URL");
    assert_eq!(config.api.key_env, "USHER_API_KEY");
    assert_eq!(config.api.storage_bucket, "media");
    assert!(!config.logging.enabled);
    assert_eq!(config.generation.order_count, 25);
    assert_eq!(config.generation.max_tickets_per_order, 4);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Invalid sidebar width should fail
    config.ui.sidebar_width = 5;
    assert!(config.validate().is_err());

    // Reset and test unknown section
    config.ui.sidebar_width = 26;
    config.ui.default_section = "tickets".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_rejects_bad_formats() {
    let mut config = Config::default();
    config.display.date_format = "%Q".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.display.time_format = "nonsense %".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_rejects_generation_defaults_out_of_bounds() {
    let mut config = Config::default();
    config.generation.order_count = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.generation.order_count = 501;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.generation.max_tickets_per_order = 11;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.generation.rsvp_ratio = 1.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.generation.free_ratio = -0.1;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("default_section = \"events\""));
    assert!(toml_str.contains("storage_bucket = \"media\""));
    assert!(toml_str.contains("order_count = 25"));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[ui]
sidebar_width = 35

[generation]
order_count = 50
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();
    assert_eq!(config.ui.sidebar_width, 35);
    assert_eq!(config.ui.default_section, "events");
    assert_eq!(config.generation.order_count, 50);
    assert_eq!(config.generation.max_tickets_per_order, 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_env_names_are_rejected() {
    let mut config = Config::default();
    config.api.url_env = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.api.storage_bucket = String::new();
    assert!(config.validate().is_err());
}
