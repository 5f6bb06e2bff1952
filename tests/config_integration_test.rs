use anyhow::Result;
use clap::Parser;
use mailchimp_sync::config::LogFormat;
use mailchimp_sync::core::ConfigProvider;
use mailchimp_sync::{CliConfig, SyncError};
use secrecy::ExposeSecret;
use tempfile::TempDir;

/// 設定檔提供全部必要值，命令列只指定檔案路徑
#[test]
fn test_config_file_supplies_required_values() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("mailchimp-sync.toml");
    std::fs::write(
        &config_path,
        r#"
[mailchimp]
api_key = "0123abcd-us9"
list_name = "members-list"

[mysql]
connection_string = "mysql://sync:pw@db:3306/club"
"#,
    )?;

    // 不經過 clap，呼叫端的 MAILCHIMP_* 環境變數不會蓋過設定檔
    let cli = CliConfig {
        mailchimp_api_key: None,
        mysql_connection_string: None,
        mysql_query: None,
        mailchimp_list_name: None,
        mailchimp_base_url: None,
        batch_size: None,
        config: Some(config_path.to_string_lossy().into_owned()),
        dry_run: false,
        verbose: false,
        log_format: LogFormat::Compact,
    };
    let settings = cli.resolve()?;

    assert_eq!(settings.list_id(), "members-list");
    assert_eq!(settings.connection_string.expose_secret(), "mysql://sync:pw@db:3306/club");
    assert_eq!(settings.query(), "SELECT firstname, lastname, email FROM members");

    let endpoint = settings.mailchimp_client()?.endpoint()?;
    assert_eq!(
        endpoint.as_str(),
        "https://us9.api.mailchimp.com/2.0/lists/batch-subscribe.json"
    );
    Ok(())
}

#[test]
fn test_missing_list_name_fails_before_io() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("partial.toml");
    std::fs::write(
        &config_path,
        "[mysql]\nconnection_string = \"mysql://sync:pw@db:3306/club\"\n",
    )?;

    let cli = CliConfig::try_parse_from([
        "mailchimp-sync",
        "--mailchimp-api-key",
        "0123abcd-us9",
        "--config",
        config_path.to_str().unwrap(),
    ])?;

    match cli.resolve() {
        Err(SyncError::MissingConfigError { field }) => {
            assert_eq!(field, "mailchimp-list-name");
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected a configuration error"),
    }
    Ok(())
}

#[test]
fn test_unreadable_config_file_is_config_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("absent.toml");

    let cli = CliConfig::try_parse_from([
        "mailchimp-sync",
        "--config",
        missing.to_str().unwrap(),
    ])?;

    let err = cli.resolve().err().expect("resolve should fail");
    assert_eq!(err.kind(), "ConfigError");
    Ok(())
}
