// Mailchimp 2.0 lists/batch-subscribe 用戶端

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::{
    BatchRequest, BatchResponse, MergeFields, SubscriberError, SubscriberPayload, SyncClient,
};
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::validate_url;

const DEFAULT_DATA_CENTER: &str = "us1";
const BATCH_SUBSCRIBE_PATH: &str = "lists/batch-subscribe.json";

/// API key 的 `-us6` 後綴就是資料中心
pub fn data_center(api_key: &str) -> &str {
    match api_key.rsplit_once('-') {
        Some((_, dc)) if !dc.is_empty() => dc,
        _ => DEFAULT_DATA_CENTER,
    }
}

pub fn default_base_url(api_key: &str) -> String {
    format!("https://{}.api.mailchimp.com/2.0/", data_center(api_key))
}

#[derive(Serialize)]
struct WireBatchSubscribe<'a> {
    apikey: &'a str,
    id: &'a str,
    batch: Vec<WireMember<'a>>,
    double_optin: bool,
    update_existing: bool,
}

#[derive(Debug, Serialize)]
struct WireMember<'a> {
    email: WireEmail<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_vars: Option<&'a MergeFields>,
}

#[derive(Debug, Serialize)]
struct WireEmail<'a> {
    email: &'a str,
}

impl<'a> From<&'a SubscriberPayload> for WireMember<'a> {
    fn from(payload: &'a SubscriberPayload) -> Self {
        Self {
            email: WireEmail {
                email: &payload.email,
            },
            merge_vars: payload.merge_fields.as_ref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireBatchResponse {
    add_count: u64,
    update_count: u64,
    error_count: u64,
    errors: Vec<WireMemberError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireMemberError {
    email: WireErrorEmail,
    code: Option<i64>,
    error: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireErrorEmail {
    email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireApiError {
    name: Option<String>,
    error: Option<String>,
}

impl From<WireBatchResponse> for BatchResponse {
    fn from(wire: WireBatchResponse) -> Self {
        Self {
            added_count: wire.add_count,
            updated_count: wire.update_count,
            error_count: wire.error_count,
            errors: wire
                .errors
                .into_iter()
                .map(|e| {
                    let message = match e.code {
                        Some(code) if e.error.is_empty() => format!("error code {}", code),
                        _ => e.error,
                    };
                    SubscriberError {
                        email: e.email.email,
                        message,
                    }
                })
                .collect(),
        }
    }
}

pub struct MailchimpClient {
    client: Client,
    api_key: SecretString,
    base_url: Url,
}

impl MailchimpClient {
    /// 依 API key 的資料中心推導 endpoint
    pub fn new(api_key: SecretString) -> Result<Self> {
        let base_url = default_base_url(api_key.expose_secret());
        Self::with_base_url(api_key, &base_url)
    }

    pub fn with_base_url(api_key: SecretString, base_url: &str) -> Result<Self> {
        let mut base_url = validate_url("mailchimp-base-url", base_url)?;
        // Url::join 需要結尾的 '/' 才會保留最後一段路徑
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url,
        })
    }

    pub fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join(BATCH_SUBSCRIBE_PATH)
            .map_err(|e| SyncError::ConfigError {
                message: format!("Cannot build Mailchimp endpoint: {}", e),
            })
    }

    fn transport_error(status: reqwest::StatusCode, body: &str) -> SyncError {
        let detail = serde_json::from_str::<WireApiError>(body)
            .ok()
            .and_then(|e| match (e.name, e.error) {
                (Some(name), Some(error)) => Some(format!("{}: {}", name, error)),
                (None, Some(error)) => Some(error),
                _ => None,
            })
            .unwrap_or_else(|| body.chars().take(200).collect());

        SyncError::TransportError {
            message: format!("HTTP {}: {}", status, detail),
        }
    }
}

impl SyncClient for MailchimpClient {
    async fn submit(&self, request: &BatchRequest) -> Result<BatchResponse> {
        let endpoint = self.endpoint()?;
        let body = WireBatchSubscribe {
            apikey: self.api_key.expose_secret(),
            id: &request.list_id,
            batch: request.entries.iter().map(WireMember::from).collect(),
            double_optin: request.double_optin,
            update_existing: request.update_existing,
        };

        tracing::debug!("POST {} ({} members)", endpoint, body.batch.len());
        let response = self.client.post(endpoint).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("Mailchimp response status: {}", status);

        if !status.is_success() {
            return Err(Self::transport_error(status, &text));
        }

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| SyncError::TransportError {
                message: format!("Malformed Mailchimp response: {}", e),
            })?;

        // 2.0 API 偶爾以 200 回傳錯誤物件
        if value.get("status").and_then(|s| s.as_str()) == Some("error") {
            return Err(Self::transport_error(status, &text));
        }

        let wire: WireBatchResponse =
            serde_json::from_value(value).map_err(|e| SyncError::TransportError {
                message: format!("Unexpected Mailchimp response: {}", e),
            })?;

        Ok(wire.into())
    }
}
