use httpmock::prelude::*;
use serde_json::json;
use shipment_etl::adapters::chat::ChatOracle;
use shipment_etl::core::ExtractionOracle;
use shipment_etl::domain::model::Email;

fn email() -> Email {
    Email {
        id: "email_001".to_string(),
        subject: "Import quote".to_string(),
        body: "500 kgs from Hong Kong to Chennai".to_string(),
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
}

#[tokio::test]
async fn test_extract_parses_plain_json_reply() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .json_body_partial(r#"{"model": "test-model", "temperature": 0}"#);
        then.status(200).json_body(completion_body(
            r#"{"origin_port_code": "HKHKG", "incoterm": "CIF", "cargo_weight_kg": "500", "is_dangerous": false}"#,
        ));
    });

    let oracle = ChatOracle::new(server.base_url(), "key".to_string(), "test-model".to_string());
    let draft = oracle.extract(&email()).await.unwrap();

    api_mock.assert();
    assert_eq!(draft.origin_port_code.as_deref(), Some("HKHKG"));
    assert_eq!(draft.incoterm.as_deref(), Some("CIF"));
    assert_eq!(draft.cargo_weight_kg, json!("500"));
    assert_eq!(draft.is_dangerous, Some(false));
    // fields the model skipped stay absent
    assert_eq!(draft.destination_port_code, None);
}

#[tokio::test]
async fn test_extract_strips_markdown_fences() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(completion_body(
            "```json\n{\"destination_port_code\": \"INMAA\"}\n```",
        ));
    });

    let oracle = ChatOracle::new(server.base_url(), "key".to_string(), "test-model".to_string());
    let draft = oracle.extract(&email()).await.unwrap();

    api_mock.assert();
    assert_eq!(draft.destination_port_code.as_deref(), Some("INMAA"));
}

#[tokio::test]
async fn test_extract_fails_on_unparsable_reply() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .json_body(completion_body("Sorry, I cannot help with that."));
    });

    let oracle = ChatOracle::new(server.base_url(), "key".to_string(), "test-model".to_string());

    assert!(oracle.extract(&email()).await.is_err());
}

#[tokio::test]
async fn test_extract_fails_on_http_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(500);
    });

    let oracle = ChatOracle::new(server.base_url(), "key".to_string(), "test-model".to_string());

    assert!(oracle.extract(&email()).await.is_err());
}

#[tokio::test]
async fn test_extract_fails_on_empty_choices() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(json!({"choices": []}));
    });

    let oracle = ChatOracle::new(server.base_url(), "key".to_string(), "test-model".to_string());

    assert!(oracle.extract(&email()).await.is_err());
}
