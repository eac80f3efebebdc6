use orgbot_core::config::Settings;
use orgbot_core::traits::ChatModel;
use orgbot_core::types::ChatMessage;
use orgbot_llm::{FakeChatModel, OllamaChat};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// The client drives its own runtime, so the mock server lives on a separate one.
fn start_server(template: ResponseTemplate) -> (tokio::runtime::Runtime, MockServer) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({"model": "gemma3:1b", "stream": false})))
            .respond_with(template)
            .mount(&server),
    );
    (rt, server)
}

fn client_for(server: &MockServer) -> OllamaChat {
    let mut settings = Settings::default().llm;
    settings.base_url = format!("{}/", server.uri());
    settings.timeout_secs = 5;
    OllamaChat::new(&settings).unwrap()
}

#[test]
fn chat_returns_message_content() {
    let (_rt, server) = start_server(
        ResponseTemplate::new(200).set_body_json(json!({"message": {"role": "assistant", "content": "RAG"}, "done": true})),
    );
    let chat = client_for(&server);
    let reply = chat.chat(&[ChatMessage::system("clasifica"), ChatMessage::user("historia")], 0.0).unwrap();
    assert_eq!(reply, "RAG");
}

#[test]
fn server_errors_and_bad_temperatures_fail() {
    let (_rt, server) = start_server(ResponseTemplate::new(500));
    let chat = client_for(&server);
    assert!(chat.chat(&[ChatMessage::user("hola")], 0.7).is_err());
    assert!(chat.chat(&[ChatMessage::user("hola")], 1.6).is_err());
}

#[test]
fn fake_model_routes_to_rag_and_echoes_questions() {
    let fake = FakeChatModel;
    let routing = [ChatMessage::system("Responde STRUCTURED o RAG"), ChatMessage::user("misión")];
    assert_eq!(fake.chat(&routing, 0.0).unwrap(), "RAG");
    let answer = fake.chat(&[ChatMessage::system("contexto"), ChatMessage::user("¿qué hacen?")], 0.7).unwrap();
    assert!(answer.ends_with("¿qué hacen?"));
}
