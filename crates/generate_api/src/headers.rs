use std::collections::BTreeMap;

use crate::config::GenerateApiConfig;
use crate::error::GenerateApiError;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_CONTENT_TYPE: &str = "content-type";

/// Build a deterministic header map for generate transport requests.
pub fn build_headers(
    config: &GenerateApiConfig,
) -> Result<BTreeMap<String, String>, GenerateApiError> {
    if config.api_key.trim().is_empty() {
        return Err(GenerateApiError::MissingApiKey);
    }

    let mut headers = BTreeMap::new();
    headers.insert(
        HEADER_AUTHORIZATION.to_owned(),
        format!("Bearer {}", config.api_key.trim()),
    );
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );
    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    Ok(headers)
}
