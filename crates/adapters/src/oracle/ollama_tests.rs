use super::*;

#[test]
fn defaults_match_original_source_constants() {
    let oracle = OllamaOracle::new(reqwest::Client::new());
    assert_eq!(oracle.base_url, DEFAULT_BASE_URL);
    assert_eq!(oracle.model, DEFAULT_MODEL);
}

#[test]
fn with_base_url_overrides_default() {
    let oracle = OllamaOracle::new(reqwest::Client::new()).with_base_url("http://ollama.local:11434");
    assert_eq!(oracle.base_url, "http://ollama.local:11434");
}
