mod behavior;
mod types;

pub use behavior::{BehaviorPreview, Operation};
pub use types::{CommandResult, CommandTarget, Device, DeviceList};

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, COOKIE, REFERER};
use reqwest::{redirect, Response, StatusCode};
use serde_json::Value;

use crate::config::{ApiConfig, Config};
use crate::credentials::{CookieBundle, CSRF_COOKIE};
use crate::error::{AlexaError, Result};
use types::DevicesResponse;

const DEVICES_PATH: &str = "/api/devices-v2/device";
const PREVIEW_PATH: &str = "/api/behaviors/preview";

/// Longest error body echoed back in `AlexaError::Api`.
const MAX_ERROR_BODY: usize = 200;

/// Client for the Alexa web console API.
///
/// The cookie bundle is bound at construction and sent with every request;
/// there is no login, refresh or retry. Each method performs at most one
/// HTTP exchange.
#[derive(Debug, Clone)]
pub struct AlexaClient {
    base_url: String,
    locale: String,
    http: reqwest::Client,
}

impl AlexaClient {
    pub fn new(api: &ApiConfig, cookies: &CookieBundle) -> Result<Self> {
        let base_url = api.base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, sensitive_header(&cookies.header_value())?);
        match cookies.csrf() {
            Some(token) => {
                headers.insert(HeaderName::from_static(CSRF_COOKIE), sensitive_header(token)?);
            }
            None => tracing::warn!(
                "Cookie bundle has no '{}' cookie; Alexa will likely reject commands",
                CSRF_COOKIE
            ),
        }
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        let referer = format!("{}/spa/index.html", base_url);
        headers.insert(
            REFERER,
            HeaderValue::from_str(&referer)
                .map_err(|_| AlexaError::Config(format!("invalid base_url: {}", api.base_url)))?,
        );

        // Redirects are not followed: an expired session is answered with a
        // redirect to the sign-in page.
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(api.user_agent.clone())
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            locale: api.locale.clone(),
            http,
        })
    }

    pub fn from_config(config: &Config, cookies: &CookieBundle) -> Result<Self> {
        Self::new(&config.api, cookies)
    }

    /// Fetch the devices linked to the account, in server order.
    pub async fn list_devices(&self) -> Result<DeviceList> {
        let url = format!("{}{}", self.base_url, DEVICES_PATH);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("cached", "false")])
            .send()
            .await?;
        let body = read_success(response).await?;

        let parsed: DevicesResponse = serde_json::from_slice(&body)
            .map_err(|e| AlexaError::MalformedResponse(format!("device list: {}", e)))?;
        tracing::debug!("Fetched {} device(s)", parsed.devices.len());

        Ok(DeviceList::new(parsed.devices))
    }

    /// Make the device at `index` say `message`.
    pub async fn speak(
        &self,
        devices: &DeviceList,
        index: usize,
        message: &str,
    ) -> Result<CommandResult> {
        let device = devices.get(index)?;
        self.run_behavior(device, Operation::Speak(message)).await
    }

    /// Make the device at `index` read the weather forecast.
    pub async fn get_weather(&self, devices: &DeviceList, index: usize) -> Result<CommandResult> {
        let device = devices.get(index)?;
        self.run_behavior(device, Operation::Weather).await
    }

    pub async fn run_behavior(
        &self,
        device: &Device,
        operation: Operation<'_>,
    ) -> Result<CommandResult> {
        let preview = BehaviorPreview::build(device, operation, &self.locale)?;
        let url = format!("{}{}", self.base_url, PREVIEW_PATH);
        tracing::debug!(
            behavior = operation.behavior_type(),
            device = device.name(),
            "POST {}",
            url
        );

        let response = self.http.post(&url).json(&preview).send().await?;
        let body = read_success(response).await?;

        Ok(CommandResult {
            device: device.name().to_string(),
            payload: decode_payload(&body),
        })
    }
}

fn sensitive_header(value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        AlexaError::InvalidCookie("cookie values must be printable ASCII".to_string())
    })?;
    header.set_sensitive(true);
    Ok(header)
}

/// Map the status to an error, or return the body of a successful response.
async fn read_success(response: Response) -> Result<Vec<u8>> {
    let status = response.status();
    tracing::debug!("Status code: {}", status);

    if status.is_success() {
        return Ok(response.bytes().await?.to_vec());
    }
    if status.is_redirection()
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
    {
        return Err(AlexaError::Authentication {
            status: status.as_u16(),
        });
    }

    let body = response.text().await.unwrap_or_default();
    Err(AlexaError::Api {
        status: status.as_u16(),
        body: body.chars().take(MAX_ERROR_BODY).collect(),
    })
}

fn decode_payload(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!("Response body is not JSON; ignoring it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(json: &str) -> CookieBundle {
        CookieBundle::from_json(json).unwrap()
    }

    #[test]
    fn empty_and_non_json_bodies_have_no_payload() {
        assert_eq!(decode_payload(b""), None);
        assert_eq!(decode_payload(b"  \n"), None);
        assert_eq!(decode_payload(b"<html>ok</html>"), None);
        assert_eq!(
            decode_payload(br#"{"ok": true}"#),
            Some(serde_json::json!({"ok": true}))
        );
    }

    #[test]
    fn client_builds_without_csrf_cookie() {
        let client = AlexaClient::new(&ApiConfig::default(), &bundle(r#"{"session-id": "abc"}"#));
        assert!(client.is_ok());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = ApiConfig {
            base_url: "https://alexa.amazon.com/".to_string(),
            ..ApiConfig::default()
        };
        let client = AlexaClient::new(&api, &bundle(r#"{"csrf": "1"}"#)).unwrap();
        assert_eq!(client.base_url, "https://alexa.amazon.com");
    }

    #[test]
    fn control_characters_in_cookies_are_rejected() {
        let err = AlexaClient::new(
            &ApiConfig::default(),
            &bundle(r#"{"session-id": "abc\ndef"}"#),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_cookie");
    }
}
