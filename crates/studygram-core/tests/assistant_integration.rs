//! Integration tests for the Gemini-backed study assistant.

use std::time::Duration;

use mockito::Matcher;
use studygram_core::assistant::{
    ChatSession, GeminiClient, GenerateRequest, StudyAssistant, TextGenerator,
    ASK_ERROR_FALLBACK, TIP_ERROR_FALLBACK,
};
use studygram_core::storage::AssistantConfig;

fn assistant_for(server: &mockito::ServerGuard) -> StudyAssistant<GeminiClient> {
    let config = AssistantConfig {
        base_url: server.url(),
        ..AssistantConfig::default()
    };
    let client = GeminiClient::new(&config.base_url, "test-key", Duration::from_secs(5)).unwrap();
    StudyAssistant::new(client, &config)
}

fn reply(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
    .to_string()
}

#[tokio::test]
async fn study_tip_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-3-flash-preview:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Regex("study tip for the subject: Chemistry".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply("Draw the reaction mechanisms by hand."))
        .create_async()
        .await;

    let tip = assistant_for(&server).study_tip("Chemistry").await;
    assert_eq!(tip, "Draw the reaction mechanisms by hand.");
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_maps_to_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let a = assistant_for(&server);
    assert_eq!(a.study_tip("History").await, TIP_ERROR_FALLBACK);
    assert_eq!(a.smart_caption("History", "raw caption").await, "raw caption");
    assert_eq!(a.ask("ctx", "why?", &[]).await, ASK_ERROR_FALLBACK);
}

#[tokio::test]
async fn chat_uses_pro_model_and_sends_history() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("POST", "/models/gemini-3-pro-preview:generateContent")
        .match_body(Matcher::Regex(
            r#"^\{"contents":\[\{"role":"user","parts":\[\{"text":"Explain entropy"\}\]\}\],"systemInstruction""#
                .into(),
        ))
        .with_status(200)
        .with_body(reply("Entropy measures disorder."))
        .create_async()
        .await;
    let follow_up = server
        .mock("POST", "/models/gemini-3-pro-preview:generateContent")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""role":"model","parts":\[\{"text":"Entropy measures disorder."\}\]"#.into()),
            Matcher::Regex("And in biology".into()),
        ]))
        .with_status(200)
        .with_body(reply("Cells export entropy as heat."))
        .create_async()
        .await;

    let a = assistant_for(&server);
    let mut chat = ChatSession::for_post("Physics", "Thermo notes", "lee");
    let answer = chat.send(&a, "Explain entropy").await.map(|m| m.content.clone());
    assert_eq!(answer.as_deref(), Some("Entropy measures disorder."));
    let answer = chat.send(&a, "And in biology?").await.map(|m| m.content.clone());
    assert_eq!(answer.as_deref(), Some("Cells export entropy as heat."));

    first.assert_async().await;
    follow_up.assert_async().await;
    assert_eq!(chat.messages().len(), 5);
}

#[tokio::test]
async fn missing_api_key_fails_each_request() {
    let config = AssistantConfig {
        api_key_env: "STUDYGRAM_TEST_KEY_THAT_IS_NEVER_SET".into(),
        ..AssistantConfig::default()
    };
    let client = GeminiClient::from_config(&config).unwrap();
    let request = GenerateRequest {
        model: config.fast_model.clone(),
        system_instruction: None,
        history: Vec::new(),
        prompt: "tip".into(),
    };
    let err = client.generate(&request).await.unwrap_err();
    assert!(err.to_string().contains("STUDYGRAM_TEST_KEY_THAT_IS_NEVER_SET"));

    let a = StudyAssistant::new(client, &config);
    assert_eq!(a.study_tip("Art").await, TIP_ERROR_FALLBACK);
}
