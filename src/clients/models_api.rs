use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::config::Vendor;
use crate::errors::{AppError, AppResult};
use crate::helpers::truncate_body;

pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(15);
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Outcome of a `GET /models` probe. `status` is absent when no response arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCheck {
    pub status: Option<u16>,
    pub body: String,
}

impl KeyCheck {
    pub fn is_valid(&self) -> bool {
        self.status == Some(200)
    }
}

pub struct ModelsClient {
    base_url: String,
    http: Client,
}

impl ModelsClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let http = Client::builder().timeout(VERIFY_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    pub async fn check(&self, vendor: Vendor, key: &str, project: Option<&str>) -> AppResult<KeyCheck> {
        let headers = auth_headers(vendor, key, project)?;
        Ok(self.check_with_headers(headers).await)
    }

    async fn check_with_headers(&self, headers: HeaderMap) -> KeyCheck {
        let url = self.models_url();
        debug!(url = %url, "verifying key");

        let resp = match self.http.get(&url).headers(headers).send().await {
            Ok(resp) => resp,
            Err(e) => {
                return KeyCheck {
                    status: None,
                    body: truncate_body(&e.to_string()),
                };
            }
        };

        let status = resp.status().as_u16();
        if status == 200 {
            return KeyCheck {
                status: Some(status),
                body: String::new(),
            };
        }

        let body = resp.text().await.unwrap_or_default();
        KeyCheck {
            status: Some(status),
            body: truncate_body(&body),
        }
    }
}

pub fn auth_headers(vendor: Vendor, key: &str, project: Option<&str>) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    match vendor {
        Vendor::Anthropic => {
            headers.insert(HeaderName::from_static("x-api-key"), header_value(key)?);
            headers.insert(
                HeaderName::from_static("anthropic-version"),
                HeaderValue::from_static(ANTHROPIC_VERSION),
            );
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Vendor::OpenAi => {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", key))?);
            if let Some(project) = project.filter(|p| !p.is_empty()) {
                headers.insert(HeaderName::from_static("openai-project"), header_value(project)?);
            }
        }
    }
    Ok(headers)
}

fn header_value(v: &str) -> AppResult<HeaderValue> {
    let mut value = HeaderValue::from_str(v)
        .map_err(|_| AppError::Config("key contains characters not allowed in a header".into()))?;
    value.set_sensitive(true);
    Ok(value)
}
