use crate::adapters::{mailchimp::MailchimpClient, mysql::MysqlSource};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use secrecy::{ExposeSecret, SecretString};

/// 解析完成的執行設定；金鑰與連線字串在 Debug 輸出中會被遮蔽
#[derive(Debug)]
pub struct SyncSettings {
    pub api_key: SecretString,
    pub connection_string: SecretString,
    pub query: String,
    pub list_id: String,
    pub base_url: Option<String>,
    pub batch_size: Option<usize>,
    pub dry_run: bool,
}

impl SyncSettings {
    pub fn mailchimp_client(&self) -> Result<MailchimpClient> {
        let api_key = SecretString::new(self.api_key.expose_secret().clone());
        match &self.base_url {
            Some(base_url) => MailchimpClient::with_base_url(api_key, base_url),
            None => MailchimpClient::new(api_key),
        }
    }

    pub fn record_source(&self) -> MysqlSource {
        MysqlSource::new(SecretString::new(
            self.connection_string.expose_secret().clone(),
        ))
    }
}

impl ConfigProvider for SyncSettings {
    fn list_id(&self) -> &str {
        &self.list_id
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn batch_size(&self) -> Option<usize> {
        self.batch_size
    }
}

impl Validate for SyncSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("mailchimp-api-key", self.api_key.expose_secret())?;
        validate_non_empty_string(
            "mysql-connection-string",
            self.connection_string.expose_secret(),
        )?;
        validate_non_empty_string("mailchimp-list-name", &self.list_id)?;
        validate_non_empty_string("mysql-query", &self.query)?;

        if let Some(base_url) = &self.base_url {
            validate_url("mailchimp-base-url", base_url)?;
        }
        if let Some(size) = self.batch_size {
            validate_positive_number("batch-size", size, 1)?;
        }

        Ok(())
    }
}
