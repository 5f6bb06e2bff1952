use crate::utils::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `--config` 指定的選用設定檔；命令列參數與環境變數優先
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub mailchimp: Option<MailchimpConfig>,
    pub mysql: Option<MysqlConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailchimpConfig {
    pub api_key: Option<String>,
    pub list_name: Option<String>,
    pub base_url: Option<String>,
    pub batch_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MysqlConfig {
    pub connection_string: Option<String>,
    pub query: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SyncError::ConfigError {
            message: format!(
                "Cannot read config file '{}': {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SyncError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAILCHIMP_API_KEY})；未設定的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SyncError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.mailchimp.as_ref()?.api_key.as_deref()
    }

    pub fn list_name(&self) -> Option<&str> {
        self.mailchimp.as_ref()?.list_name.as_deref()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.mailchimp.as_ref()?.base_url.as_deref()
    }

    pub fn batch_size(&self) -> Option<usize> {
        self.mailchimp.as_ref()?.batch_size
    }

    pub fn connection_string(&self) -> Option<&str> {
        self.mysql.as_ref()?.connection_string.as_deref()
    }

    pub fn query(&self) -> Option<&str> {
        self.mysql.as_ref()?.query.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[mailchimp]
api_key = "0123abcd-us6"
list_name = "a1b2c3"
batch_size = 500

[mysql]
connection_string = "mysql://sync:pw@db:3306/club"
query = "SELECT email FROM members WHERE active = 1"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_key(), Some("0123abcd-us6"));
        assert_eq!(config.list_name(), Some("a1b2c3"));
        assert_eq!(config.batch_size(), Some(500));
        assert_eq!(config.base_url(), None);
        assert_eq!(
            config.query(),
            Some("SELECT email FROM members WHERE active = 1")
        );
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.api_key().is_none());
        assert!(config.connection_string().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MAILCHIMP_SYNC_TEST_DSN", "mysql://u:p@localhost/db");

        let toml_content = r#"
[mysql]
connection_string = "${MAILCHIMP_SYNC_TEST_DSN}"
query = "SELECT email FROM ${MAILCHIMP_SYNC_TEST_UNSET_TABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.connection_string(), Some("mysql://u:p@localhost/db"));
        assert_eq!(
            config.query(),
            Some("SELECT email FROM ${MAILCHIMP_SYNC_TEST_UNSET_TABLE}")
        );

        std::env::remove_var("MAILCHIMP_SYNC_TEST_DSN");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[mailchimp\napi_key = 1").unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[mailchimp]\nlist_name = \"from-file\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.list_name(), Some("from-file"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfig::from_file("/nonexistent/mailchimp-sync.toml").unwrap_err();
        assert!(matches!(err, SyncError::ConfigError { .. }));
    }
}
