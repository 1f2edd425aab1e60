use std::time::Duration;

use futures_util::StreamExt;
use packager_logging::packager_debug;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{ConvertPayload, FailureKind, ServiceResponse, TransportError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    /// Path appended to `base_url`.
    pub endpoint: String,
    /// `None` leaves the transport's own behaviour in place.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_body_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: "convert".to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl ServiceSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Joins `endpoint` onto `base_url`, keeping every segment of the base path.
    pub fn endpoint_url(&self) -> Result<Url, TransportError> {
        let mut base = Url::parse(&self.base_url)
            .map_err(|err| TransportError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(self.endpoint.trim_start_matches('/'))
            .map_err(|err| TransportError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait PackagerClient: Send + Sync {
    /// Sends one conversion request. Any HTTP status is a response; only
    /// transport-level problems are errors.
    async fn convert(&self, payload: &ConvertPayload) -> Result<ServiceResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPackagerClient {
    settings: ServiceSettings,
}

impl ReqwestPackagerClient {
    pub fn new(settings: ServiceSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> TransportError {
        TransportError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_body_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }

    /// Streams the body, failing once it exceeds `max_body_bytes`.
    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, TransportError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_body_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_body_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl PackagerClient for ReqwestPackagerClient {
    async fn convert(&self, payload: &ConvertPayload) -> Result<ServiceResponse, TransportError> {
        let endpoint = self.settings.endpoint_url()?;
        let client = self.build_client()?;
        let body = serde_json::to_vec(payload)
            .map_err(|err| TransportError::new(FailureKind::Body, err.to_string()))?;

        packager_debug!("POST {} ({} bytes)", endpoint, body.len());
        let response = client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // A rejection stays a rejection even when its body is unusable.
            let body = match self.read_body(response).await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(err) => {
                    packager_debug!("Discarding body of {} response: {}", status, err);
                    String::new()
                }
            };
            return Ok(ServiceResponse {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = self.read_body(response).await?;
        let body = String::from_utf8(bytes)
            .map_err(|err| TransportError::new(FailureKind::Body, err.to_string()))?;
        Ok(ServiceResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_body() || err.is_decode() {
        return TransportError::new(FailureKind::Body, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_segments() {
        let settings = ServiceSettings::default();
        assert_eq!(
            settings.endpoint_url().unwrap().as_str(),
            "http://localhost:3000/api/v1/convert"
        );

        let settings = ServiceSettings {
            endpoint: "/package".to_string(),
            ..ServiceSettings::with_base_url("https://packager.example/")
        };
        assert_eq!(
            settings.endpoint_url().unwrap().as_str(),
            "https://packager.example/package"
        );
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let err = ServiceSettings::with_base_url("localhost")
            .endpoint_url()
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEndpoint);
    }

    #[test]
    fn payload_omits_missing_app_name() {
        let with_name = ConvertPayload {
            url: "https://my-app.example".to_string(),
            app_name: Some("Demo".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&with_name).unwrap(),
            serde_json::json!({"url": "https://my-app.example", "appName": "Demo"})
        );

        let url_only = ConvertPayload {
            app_name: None,
            ..with_name
        };
        assert_eq!(
            serde_json::to_value(&url_only).unwrap(),
            serde_json::json!({"url": "https://my-app.example"})
        );
    }
}
