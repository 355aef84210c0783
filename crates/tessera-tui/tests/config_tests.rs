use std::env;
use std::fs;
use tempfile::TempDir;
use tessera_tui::buffer::RenderMode;
use tessera_tui::config::{LoggingConfig, TuiConfig, CONFIG_ENV_VAR};
use tessera_tui::logging;
use tessera_tui::style::Color;

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tessera.toml");
    fs::write(
        &path,
        r#"
[render]
mode = "plain"
default_char = "."

[input]
wait_for_input = false

[screen]
auto_resize = true

[logging]
level = "warn"
file = "/tmp/tessera.log"
"#,
    )
    .unwrap();

    let config = TuiConfig::load_from_file(&path).unwrap();
    assert_eq!(config.render.mode, RenderMode::Plain);
    assert_eq!(config.render.default_char, '.');
    assert!(!config.input.wait_for_input);
    assert!(config.screen.auto_resize);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(
        config.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/tessera.log"))
    );

    let settings = config.play_settings();
    assert_eq!(settings.render_mode, RenderMode::Plain);
    assert!(!settings.wait_for_input);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = TuiConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
    assert!(!path.exists());
}

#[test]
fn test_malformed_file_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[render\nmode = ").unwrap();

    let err = TuiConfig::load_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.toml"));
}

#[test]
fn test_logging_to_file() {
    let dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        level: "debug".to_string(),
        file: Some(dir.path().join("engine.log")),
    };

    logging::init(&config).unwrap();
    tracing::debug!(target: "tessera_tui", "hello from test");
    assert!(dir.path().join("engine.log").exists());

    // Only one global subscriber can be installed
    assert!(logging::init(&config).is_err());
}

// Environment variables are process-wide, so every scenario that touches
// them runs inside this one test.
#[test]
fn test_environment_overrides_and_discovery() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("from-env.toml");
    fs::write(
        &path,
        r##"
[render]
mode = "plain"
bg = "#102030"

[logging]
level = "error"
"##,
    )
    .unwrap();

    // The file named by TESSERA_CONFIG is found when nothing earlier exists
    env::remove_var("TESSERA_LOG_LEVEL");
    env::remove_var("TESSERA_RENDER_MODE");
    env::set_var(CONFIG_ENV_VAR, &path);
    let mut config = TuiConfig::load().unwrap();
    assert_eq!(config.render.mode, RenderMode::Plain);
    assert_eq!(config.render.bg, Some(Color::Rgb(0x10, 0x20, 0x30)));
    assert_eq!(config.logging.level, "error");

    // Overrides replace file values
    env::set_var("TESSERA_LOG_LEVEL", "DEBUG");
    env::set_var("TESSERA_RENDER_MODE", "Styled");
    config.apply_env_overrides();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.render.mode, RenderMode::Styled);

    env::set_var("TESSERA_RENDER_MODE", "plain");
    config.apply_env_overrides();
    assert_eq!(config.render.mode, RenderMode::Plain);

    // An unknown render mode leaves the current one alone
    env::set_var("TESSERA_RENDER_MODE", "sparkly");
    config.apply_env_overrides();
    assert_eq!(config.render.mode, RenderMode::Plain);
    assert!(config.validate().is_ok());

    // An overridden level is still validated
    env::set_var("TESSERA_LOG_LEVEL", "chatty");
    config.apply_env_overrides();
    assert!(config.validate().is_err());

    // A broken file named by the variable is reported, not skipped
    let broken = dir.path().join("broken-env.toml");
    fs::write(&broken, "[input]\nwait_for_input = \"sometimes\"").unwrap();
    env::set_var(CONFIG_ENV_VAR, &broken);
    let err = TuiConfig::load().unwrap_err();
    assert!(format!("{err:#}").contains("broken-env.toml"));

    // A variable naming a missing file falls back to defaults
    env::set_var(CONFIG_ENV_VAR, dir.path().join("gone.toml"));
    assert_eq!(TuiConfig::load().unwrap(), TuiConfig::default());

    env::remove_var(CONFIG_ENV_VAR);
    env::remove_var("TESSERA_LOG_LEVEL");
    env::remove_var("TESSERA_RENDER_MODE");
}
