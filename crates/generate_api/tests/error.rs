use generate_api::error::parse_error_message;
use generate_api::GenerateApiError;
use reqwest::StatusCode;

#[test]
fn parse_error_message_prefers_endpoint_message_field() {
    let body = r#"{"message":"invalid api token"}"#;
    assert_eq!(
        parse_error_message(StatusCode::UNAUTHORIZED, body),
        "invalid api token"
    );
}

#[test]
fn parse_error_message_falls_back_to_raw_body() {
    assert_eq!(
        parse_error_message(StatusCode::BAD_GATEWAY, "upstream exploded"),
        "upstream exploded"
    );
}

#[test]
fn parse_error_message_uses_canonical_reason_for_empty_body() {
    assert_eq!(
        parse_error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
        "Service Unavailable"
    );
}

#[test]
fn parse_error_message_ignores_blank_message_field() {
    let body = r#"{"message":"   "}"#;
    assert_eq!(parse_error_message(StatusCode::BAD_REQUEST, body), body);
}

#[test]
fn error_display_is_stable() {
    assert_eq!(
        GenerateApiError::MissingApiKey.to_string(),
        "API key is required"
    );
    assert_eq!(
        GenerateApiError::EmptyGenerations.to_string(),
        "response contained no generations"
    );
    assert_eq!(
        GenerateApiError::Status(StatusCode::TOO_MANY_REQUESTS, "slow down".to_string())
            .to_string(),
        "HTTP 429 Too Many Requests slow down"
    );
    assert_eq!(
        GenerateApiError::InvalidBaseUrl("::".to_string()).to_string(),
        "invalid base URL: ::"
    );
}
