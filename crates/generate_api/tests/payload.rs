use generate_api::payload::{DEFAULT_MODEL, MAX_TOKENS, TEMPERATURE};
use generate_api::{GenerateRequest, GenerateResponse};
use serde_json::json;

#[test]
fn request_defaults_match_wire_contract() {
    let request = GenerateRequest::new("hi");

    assert_eq!(request.prompt, "hi");
    assert_eq!(request.max_tokens, MAX_TOKENS);
    assert_eq!(request.model, DEFAULT_MODEL);
    assert_eq!(request.temperature, TEMPERATURE);
    assert_eq!(MAX_TOKENS, 1000);
    assert_eq!(DEFAULT_MODEL, "command-xlarge-nightly");
}

#[test]
fn request_serializes_exact_field_names() {
    let value = serde_json::to_value(GenerateRequest::new("hi")).expect("serialize request");

    assert_eq!(
        value,
        json!({
            "prompt": "hi",
            "max_tokens": 1000,
            "model": "command-xlarge-nightly",
            "temperature": 0.7,
        })
    );
}

#[test]
fn request_model_override_is_preserved() {
    let request = GenerateRequest::new("hi").with_model("command-light");
    assert_eq!(request.model, "command-light");
}

#[test]
fn response_deserializes_generations_in_order() {
    let body = r#"{"generations":[{"text":"one"},{"text":"two"}]}"#;
    let parsed: GenerateResponse = serde_json::from_str(body).expect("response");

    assert_eq!(parsed.generations.len(), 2);
    assert_eq!(parsed.generations[0].text, "one");
    assert_eq!(parsed.generations[1].text, "two");
}

#[test]
fn response_tolerates_missing_generations_field() {
    let parsed: GenerateResponse = serde_json::from_str("{}").expect("response");
    assert!(parsed.generations.is_empty());
}
