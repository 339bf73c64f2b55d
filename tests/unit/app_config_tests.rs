/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subnorm::app_config::{Config, LogLevel, OutputFormat};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.fetch.timeout_secs, 30);
    assert_eq!(config.fetch.max_retries, 2);
    assert_eq!(config.fetch.retry_backoff_ms, 500);
    assert!(config.fetch.user_agent.starts_with("subnorm/"));
    assert!(config.output.pretty);
    assert_eq!(config.output.format, OutputFormat::Json);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.fetch.timeout_secs = 0;
    assert!(config.validate().is_err());

    config.fetch.timeout_secs = 5;
    config.fetch.user_agent = "   ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_loadOrDefault_withMissingFile_shouldReturnDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load_or_default(temp_dir.path().join("absent.json"))?;
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_loadOrDefault_withPartialFile_shouldFillMissingFields() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"log_level": "debug", "fetch": {"max_retries": 5}, "output": {"format": "srt"}}"#,
    )?;

    let config = Config::load_or_default(&path)?;
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.fetch.max_retries, 5);
    assert_eq!(config.fetch.timeout_secs, 30);
    assert_eq!(config.output.format, OutputFormat::Srt);
    assert!(config.output.pretty);
    Ok(())
}

#[test]
fn test_loadOrDefault_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_default(&path).is_err());
    Ok(())
}

#[test]
fn test_save_thenLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("saved.json");

    let mut config = Config::default();
    config.log_level = LogLevel::Warn;
    config.fetch.user_agent = "tester/1.0".to_string();
    config.output.pretty = false;
    config.save(&path)?;

    assert_eq!(Config::load_or_default(&path)?, config);
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_outputFormat_fileSuffix_shouldNotCollideWithSrtInput() {
    assert_eq!(OutputFormat::Json.file_suffix(), "json");
    assert_eq!(OutputFormat::Srt.file_suffix(), "normalized.srt");
}
