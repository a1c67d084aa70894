use generate_api::normalize_generate_url;
use generate_api::url::DEFAULT_GENERATE_BASE_URL;

#[test]
fn url_keeps_full_generate_path() {
    assert_eq!(
        normalize_generate_url("https://api.cohere.ai/v1/generate"),
        "https://api.cohere.ai/v1/generate"
    );
}

#[test]
fn url_appends_generate_to_v1_path() {
    assert_eq!(
        normalize_generate_url("https://api.cohere.ai/v1"),
        "https://api.cohere.ai/v1/generate"
    );
}

#[test]
fn url_appends_versioned_path_to_bare_host() {
    assert_eq!(
        normalize_generate_url("https://api.cohere.ai"),
        "https://api.cohere.ai/v1/generate"
    );
}

#[test]
fn url_trims_whitespace_and_trailing_slashes() {
    assert_eq!(
        normalize_generate_url("  https://api.cohere.ai/v1/  "),
        "https://api.cohere.ai/v1/generate"
    );
}

#[test]
fn url_falls_back_to_default_base_when_blank() {
    assert_eq!(
        normalize_generate_url(""),
        format!("{DEFAULT_GENERATE_BASE_URL}/v1/generate")
    );
    assert_eq!(
        normalize_generate_url("   "),
        format!("{DEFAULT_GENERATE_BASE_URL}/v1/generate")
    );
}
