mod common;

use cipherforge::api::{handle_request, DecryptRequest, DecryptResponse, Iterations, Mode, ModelRegistry};
use cipherforge::config::Config;
use cipherforge::error::DecipherError;
use cipherforge::model::LanguageModel;
use cipherforge::text::{default_pool, Language};
use common::abc_model;
use rstest::rstest;
use tempfile::tempdir;

fn registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry.insert(Language::English, (*abc_model()).clone());
    registry
}

fn seeded_config() -> Config {
    let mut config = Config::default();
    config.search.seed = Some(42);
    config
}

fn decipher(text: &str, iterations: Option<Iterations>) -> DecryptRequest {
    DecryptRequest {
        mode: Mode::Decipher,
        language: "en".to_string(),
        input_text: text.to_string(),
        iterations,
    }
}

fn expect_invalid(response: DecryptResponse) -> String {
    match response {
        DecryptResponse::InvalidInput { message } => message,
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

// --- ITERATIONS ---

#[rstest]
#[case(Iterations::Integer(250), 250)]
#[case(Iterations::Text("100".to_string()), 100)]
#[case(Iterations::Text(" 7 ".to_string()), 7)]
fn test_iterations_accepted(#[case] raw: Iterations, #[case] expected: usize) {
    assert_eq!(raw.parse().unwrap(), expected);
}

#[rstest]
#[case(Iterations::Integer(0))]
#[case(Iterations::Integer(-5))]
#[case(Iterations::Float(2.5))]
#[case(Iterations::Text("10.5".to_string()))]
#[case(Iterations::Text("many".to_string()))]
#[case(Iterations::Text(String::new()))]
fn test_iterations_rejected(#[case] raw: Iterations) {
    assert!(raw.parse().unwrap_err().is_invalid_input());
}

// --- DECIPHER ---

#[test]
fn test_decipher_returns_full_plaintext() {
    let request = decipher("xyxy", Some(Iterations::Integer(200)));
    let response = handle_request(&registry(), &request, &seeded_config()).unwrap();

    let DecryptResponse::Deciphered {
        text,
        score,
        acceptance_rate,
    } = response
    else {
        panic!("expected a deciphered response");
    };
    assert_eq!(text.chars().count(), 4);
    assert_eq!(text, "abab");
    assert!((score - 20.01).abs() < 1e-9);
    let rate = acceptance_rate.unwrap();
    assert!((0.0..=100.0).contains(&rate));
}

#[test]
fn test_decipher_is_reproducible_with_seed() {
    let request = decipher("qwqwwqeq", Some(Iterations::Integer(50)));
    let a = handle_request(&registry(), &request, &seeded_config()).unwrap();
    let b = handle_request(&registry(), &request, &seeded_config()).unwrap();
    assert_eq!(a, b);
}

#[rstest]
#[case::empty_text(decipher("", Some(Iterations::Integer(10))))]
#[case::too_many_symbols(decipher("wxyz", Some(Iterations::Integer(10))))]
#[case::missing_iterations(decipher("xyxy", None))]
#[case::bad_iterations(decipher("xyxy", Some(Iterations::Text("abc".to_string()))))]
#[case::zero_iterations(decipher("xyxy", Some(Iterations::Integer(0))))]
fn test_decipher_rejects_bad_input(#[case] request: DecryptRequest) {
    let response = handle_request(&registry(), &request, &seeded_config()).unwrap();
    assert!(!expect_invalid(response).is_empty());
}

#[test]
fn test_unknown_language_is_invalid_input() {
    let mut request = decipher("xyxy", Some(Iterations::Integer(10)));
    request.language = "klingon".to_string();
    let message = expect_invalid(handle_request(&registry(), &request, &seeded_config()).unwrap());
    assert!(message.contains("klingon"));
}

#[test]
fn test_language_without_model_is_invalid_input() {
    let mut request = decipher("xyxy", Some(Iterations::Integer(10)));
    request.language = "ru".to_string();
    expect_invalid(handle_request(&registry(), &request, &seeded_config()).unwrap());
}

#[test]
fn test_invalid_config_is_an_internal_error() {
    let mut config = seeded_config();
    config.search.restarts = 0;
    let request = decipher("xyxy", Some(Iterations::Integer(10)));
    let err = handle_request(&registry(), &request, &config).unwrap_err();
    assert!(matches!(err, DecipherError::Config(_)));
}

// --- ENCRYPT ---

#[test]
fn test_encrypt_cleans_then_substitutes() {
    let request = DecryptRequest {
        mode: Mode::Encrypt,
        language: "english".to_string(),
        input_text: "Hello,  World!".to_string(),
        iterations: None,
    };
    let response = handle_request(&registry(), &request, &seeded_config()).unwrap();

    let DecryptResponse::Encrypted { text } = response else {
        panic!("expected an encrypted response");
    };
    // "hello world" keeps its length and its 8 distinct symbols.
    assert_eq!(text.chars().count(), 11);
    let pool = default_pool();
    assert!(text.chars().all(|c| pool.contains(&c)));
    let distinct: std::collections::BTreeSet<char> = text.chars().collect();
    assert_eq!(distinct.len(), 8);
}

// --- WIRE FORMAT ---

#[test]
fn test_request_json_accepts_string_iterations() {
    let json = r#"{"mode":"decipher","language":"en","input_text":"xyxy","iterations":"100"}"#;
    let request: DecryptRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.mode, Mode::Decipher);
    assert_eq!(request.iterations, Some(Iterations::Text("100".to_string())));

    let json = r#"{"mode":"encrypt","language":"ru","input_text":"да"}"#;
    let request: DecryptRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.mode, Mode::Encrypt);
    assert!(request.iterations.is_none());
}

#[test]
fn test_response_json_is_tagged_by_status() {
    let response = DecryptResponse::InvalidInput {
        message: "nope".to_string(),
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["status"], "invalid_input");
    assert_eq!(value["message"], "nope");

    let value = serde_json::to_value(DecryptResponse::Encrypted {
        text: "⊢".to_string(),
    })
    .unwrap();
    assert_eq!(value["status"], "encrypted");
}

// --- REGISTRY ---

#[test]
fn test_registry_loads_every_language() {
    let dir = tempdir().unwrap();
    let model: LanguageModel = (*abc_model()).clone();
    model.save_to_file(dir.path().join("en.json")).unwrap();
    model.save_to_file(dir.path().join("ru.json")).unwrap();

    let registry = ModelRegistry::load_dir(dir.path()).unwrap();
    assert_eq!(registry.languages(), vec![Language::Russian, Language::English]);
    assert_eq!(registry.get(Language::English).unwrap().len(), 3);
}

#[test]
fn test_registry_missing_model_is_fatal() {
    let dir = tempdir().unwrap();
    (*abc_model()).save_to_file(dir.path().join("en.json")).unwrap();

    let err = ModelRegistry::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, DecipherError::Model(_)));
    assert!(err.to_string().contains("ru"));
}
