//! Transport and scan invokers.

use std::time::Duration;

use reqwest::Client as HttpClient;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use scangate_core::{ScanKind, ScanResult};

use crate::error::{TransportCause, TransportError};
use crate::request::{ScanOutputRequest, ScanPromptRequest};
use crate::ClientConfig;

/// Client for the scanning service.
///
/// Holds one HTTP client configured with the request timeout. Every call is
/// a single POST: there is no retry and no local recovery.
pub struct ScanClient {
    config: ClientConfig,
    http_client: HttpClient,
}

impl ScanClient {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::new(config.base_url.clone(), e))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST a JSON payload to `path` and return the response object.
    pub async fn invoke<P>(&self, path: &str, payload: &P) -> Result<Map<String, Value>, TransportError>
    where
        P: Serialize + ?Sized,
    {
        let url = self.config.url_for(path);

        debug!("Sending scan request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.token))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::new(&url, e))?;

        let status = response.status();
        debug!("Scan service responded with {} for {}", status, url);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::new(
                &url,
                TransportCause::Status {
                    status: status.as_u16(),
                    body,
                },
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(&url, e))?;

        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(TransportError::new(
                &url,
                TransportCause::Decode(format!("expected object, got {}", truncate(&other.to_string()))),
            )),
            Err(e) => Err(TransportError::new(
                &url,
                TransportCause::Decode(format!("{}: {}", e, truncate(&body))),
            )),
        }
    }

    /// Run one scan of the given kind and normalize the response.
    pub async fn scan<P>(&self, kind: ScanKind, payload: &P) -> Result<ScanResult, TransportError>
    where
        P: Serialize + ?Sized,
    {
        let data = self.invoke(kind.endpoint(), payload).await?;
        Ok(ScanResult::from_response(kind, data))
    }

    /// Send user input to the service for validation before it reaches a model.
    pub async fn scan_prompt(
        &self,
        prompt: &str,
        scanners: &[String],
    ) -> Result<ScanResult, TransportError> {
        let request = ScanPromptRequest { prompt, scanners };
        self.scan(ScanKind::Prompt, &request).await
    }

    /// Scan model output before it is returned to the user.
    pub async fn scan_output(
        &self,
        prompt: &str,
        output: &str,
        scanners: &[String],
    ) -> Result<ScanResult, TransportError> {
        let request = ScanOutputRequest {
            prompt,
            output,
            scanners,
        };
        self.scan(ScanKind::Output, &request).await
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(200).collect()
}
