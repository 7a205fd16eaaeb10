use super::*;
use serial_test::serial;

#[test]
#[serial(anthropic_api_key_env)]
fn from_env_returns_none_when_key_unset() {
    std::env::remove_var("ANTHROPIC_API_KEY");
    assert!(AnthropicOracle::from_env(reqwest::Client::new()).is_none());
}

#[test]
#[serial(anthropic_api_key_env)]
fn from_env_picks_up_key_when_set() {
    std::env::set_var("ANTHROPIC_API_KEY", "test-key-123");
    let oracle = AnthropicOracle::from_env(reqwest::Client::new()).unwrap();
    assert_eq!(oracle.api_key, "test-key-123");
    std::env::remove_var("ANTHROPIC_API_KEY");
}

#[test]
fn with_model_overrides_default() {
    let oracle =
        AnthropicOracle::new(reqwest::Client::new(), "key".to_string()).with_model("claude-opus-4");
    assert_eq!(oracle.model, "claude-opus-4");
}
