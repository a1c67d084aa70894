/// Default base URL for generate transport requests.
pub const DEFAULT_GENERATE_BASE_URL: &str = "https://api.cohere.ai";

/// Normalize a base URL to a generate endpoint.
///
/// Normalization rules:
/// 1) keep `/v1/generate` unchanged
/// 2) append `/generate` when path ends in `/v1`
/// 3) append `/v1/generate` otherwise
pub fn normalize_generate_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_GENERATE_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/v1/generate") {
        return trimmed.to_string();
    }
    if trimmed.ends_with("/v1") {
        return format!("{trimmed}/generate");
    }
    format!("{trimmed}/v1/generate")
}
