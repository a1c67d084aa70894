use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::config::GenerateApiConfig;
use crate::error::{parse_error_message, GenerateApiError};
use crate::headers::build_headers;
use crate::payload::{GenerateRequest, GenerateResponse};
use crate::url::normalize_generate_url;

#[derive(Debug)]
pub struct GenerateApiClient {
    http: Client,
    config: GenerateApiConfig,
}

impl GenerateApiClient {
    pub fn new(config: GenerateApiConfig) -> Result<Self, GenerateApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GenerateApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GenerateApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_generate_url(&self.config.base_url)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, GenerateApiError> {
        let headers = build_headers(&self.config)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    GenerateApiError::InvalidBaseUrl(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    GenerateApiError::InvalidBaseUrl(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &GenerateRequest,
    ) -> Result<reqwest::RequestBuilder, GenerateApiError> {
        let headers = self.build_headers()?;
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Issues one POST for `prompt` and returns the first generation's text,
    /// trimmed.
    ///
    /// Any transport error, non-2xx status, malformed body, or empty
    /// generations list is an error; no partial results are returned and
    /// nothing is retried.
    pub async fn complete(&self, prompt: &str) -> Result<String, GenerateApiError> {
        let request = GenerateRequest::new(prompt).with_model(self.config.model.clone());
        let response = self
            .build_request(&request)?
            .send()
            .await
            .map_err(GenerateApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            return Err(GenerateApiError::Status(
                status,
                parse_error_message(status, &body),
            ));
        }

        let body = response.text().await.map_err(GenerateApiError::from)?;
        reply_from_body(&body)
    }
}

/// Extracts the first generation's trimmed text from a success body.
pub fn reply_from_body(body: &str) -> Result<String, GenerateApiError> {
    let parsed: GenerateResponse = serde_json::from_str(body)?;
    let first = parsed
        .generations
        .first()
        .ok_or(GenerateApiError::EmptyGenerations)?;
    Ok(first.text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::reply_from_body;
    use crate::error::GenerateApiError;

    #[test]
    fn reply_from_body_trims_first_generation() {
        let body = r#"{"generations":[{"text":" world "}]}"#;
        assert_eq!(reply_from_body(body).expect("reply"), "world");
    }

    #[test]
    fn reply_from_body_consumes_only_index_zero() {
        let body = r#"{"generations":[{"text":"first"},{"text":"second"}]}"#;
        assert_eq!(reply_from_body(body).expect("reply"), "first");
    }

    #[test]
    fn reply_from_body_rejects_empty_generations() {
        let missing = r#"{}"#;
        let empty = r#"{"generations":[]}"#;

        assert!(matches!(
            reply_from_body(missing),
            Err(GenerateApiError::EmptyGenerations)
        ));
        assert!(matches!(
            reply_from_body(empty),
            Err(GenerateApiError::EmptyGenerations)
        ));
    }

    #[test]
    fn reply_from_body_rejects_malformed_json() {
        assert!(matches!(
            reply_from_body("not json"),
            Err(GenerateApiError::Serde(_))
        ));
    }
}
