//! Mailchimp API HTTP client
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic.
//! Authenticates with HTTP Basic auth (`apikey:<api key>`).

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::Level;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::MailchimpApi;
use super::types::ProblemDocument;
use crate::config::MailchimpConfig;
use crate::error::ApiError;

/// Blocking Mailchimp API client
pub struct HttpApi {
    agent: ureq::Agent,
    base_url: Url,
    authorization: String,
    debug: bool,
}

impl HttpApi {
    /// Per-request timeout
    const TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client for the datacenter encoded in the config's API key
    pub fn new(config: &MailchimpConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        Self::with_base_url(&base_url, &config.api_key, config.debug)
    }

    /// Create a client against an explicit API root
    pub fn with_base_url(base_url: &str, api_key: &str, debug: bool) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid Mailchimp base URL: {}", base_url))?;

        let agent_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Self::TIMEOUT))
            .build();

        let credentials = STANDARD.encode(format!("apikey:{}", api_key));

        Ok(Self {
            agent: agent_config.into(),
            base_url,
            authorization: format!("Basic {}", credentials),
            debug,
        })
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid API path: {}", path))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    fn log_level(&self) -> Level {
        if self.debug { Level::Info } else { Level::Debug }
    }

    /// Read the body of a response, turning non-success statuses into `ApiError`
    fn read_response(
        &self,
        method: &'static str,
        path: &str,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<Value> {
        let status = response.status();
        log::log!(self.log_level(), "mailchimp: {} {} -> {}", method, path, status.as_u16());

        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("Failed to read response for {} {}", method, path))?;

        decode_response(method, path, status.as_u16(), &body)
    }
}

/// Decode a response body, turning non-success statuses into `ApiError`
///
/// An unreadable problem document still yields an `ApiError` with empty
/// `title`/`detail`. An empty success body decodes to `Value::Null`.
fn decode_response(method: &'static str, path: &str, status: u16, body: &str) -> Result<Value> {
    if !(200..300).contains(&status) {
        let problem: ProblemDocument = serde_json::from_str(body).unwrap_or_default();
        return Err(ApiError {
            status,
            method,
            path: path.to_string(),
            title: problem.title,
            detail: problem.detail,
        }
        .into());
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(body)
        .with_context(|| format!("Failed to parse response for {} {}", method, path))
}

impl MailchimpApi for HttpApi {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.url(path, query)?;
        log::log!(self.log_level(), "mailchimp: GET {}", url);

        let response = self
            .agent
            .get(url.as_str())
            .header("Authorization", &self.authorization)
            .call()
            .with_context(|| format!("Failed to send GET {}", path))?;

        self.read_response("GET", path, response)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path, &[])?;
        log::log!(self.log_level(), "mailchimp: POST {} {}", url, body);

        let response = self
            .agent
            .post(url.as_str())
            .header("Authorization", &self.authorization)
            .send_json(body)
            .with_context(|| format!("Failed to send POST {}", path))?;

        self.read_response("POST", path, response)
    }
}
