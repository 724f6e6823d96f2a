use std::time::Duration;

use chat_api::{ChatApiClient, ChatApiConfig, ChatApiError, ChatRequest, HistoryRole, HistoryTurn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

struct ScriptedServer {
    base_url: String,
    handle: JoinHandle<Option<String>>,
}

impl ScriptedServer {
    /// Serves exactly one connection with a canned response, returning the
    /// raw request bytes the client sent.
    async fn one_shot(status_line: &'static str, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("local TCP listener should bind");
        let addr = listener.local_addr().expect("resolved listener address");
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.ok()?;
            let request = read_request(&mut socket).await?;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.ok()?;
            socket.shutdown().await.ok();
            Some(request)
        });

        Self { base_url, handle }
    }

    /// Accepts one connection and never responds, to exercise the timeout path.
    async fn silent() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("local TCP listener should bind");
        let addr = listener.local_addr().expect("resolved listener address");
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.ok()?;
            let request = read_request(&mut socket).await?;
            tokio::time::sleep(Duration::from_secs(60)).await;
            Some(request)
        });

        Self { base_url, handle }
    }

    async fn observed_request(self) -> Option<String> {
        self.handle.await.ok().flatten()
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let read = socket.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&buffer).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                return Some(text);
            }
        }
    }

    Some(String::from_utf8_lossy(&buffer).to_string())
}

fn client_for(base_url: &str) -> ChatApiClient {
    ChatApiClient::new(ChatApiConfig::new(base_url)).expect("client should build")
}

#[tokio::test]
async fn successful_exchange_parses_reply_and_metadata() {
    let server = ScriptedServer::one_shot(
        "200 OK",
        r#"{"response": "I build agent pipelines.", "tokensUsed": 87, "provider": "Groq"}"#
            .to_string(),
    )
    .await;

    let client = client_for(&server.base_url);
    let request = ChatRequest::new(
        "What do you build?",
        vec![HistoryTurn {
            role: HistoryRole::User,
            content: "hi".to_string(),
        }],
    );

    let reply = client.send(&request).await.expect("exchange should succeed");
    assert_eq!(reply.response, "I build agent pipelines.");
    assert_eq!(reply.tokens_used, 87);
    assert_eq!(reply.provider.as_deref(), Some("Groq"));

    let observed = server.observed_request().await.expect("request captured");
    assert!(observed.starts_with("POST /chat"));
    assert!(observed.contains(r#""conversationHistory""#));
    assert!(observed.contains(r#""message":"What do you build?""#));
}

#[tokio::test]
async fn missing_token_metadata_defaults_to_zero() {
    let server =
        ScriptedServer::one_shot("200 OK", r#"{"response": "Hello!"}"#.to_string()).await;

    let client = client_for(&server.base_url);
    let reply = client
        .send(&ChatRequest::new("hi", Vec::new()))
        .await
        .expect("exchange should succeed");

    assert_eq!(reply.tokens_used, 0);
    assert!(reply.provider.is_none());
}

#[tokio::test]
async fn backend_error_status_surfaces_extracted_detail() {
    let server = ScriptedServer::one_shot(
        "500 Internal Server Error",
        r#"{"detail": "Error processing chat message"}"#.to_string(),
    )
    .await;

    let client = client_for(&server.base_url);
    let error = client
        .send(&ChatRequest::new("hi", Vec::new()))
        .await
        .expect_err("non-2xx should fail");

    match error {
        ChatApiError::Status(status, message) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(message, "Error processing chat message");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_failure() {
    let server = ScriptedServer::one_shot("200 OK", "<html>not json</html>".to_string()).await;

    let client = client_for(&server.base_url);
    let error = client
        .send(&ChatRequest::new("hi", Vec::new()))
        .await
        .expect_err("non-JSON body should fail");

    assert!(matches!(error, ChatApiError::MalformedBody(_)));
}

#[tokio::test]
async fn hung_backend_times_out_instead_of_waiting_forever() {
    let server = ScriptedServer::silent().await;

    let config = ChatApiConfig::new(&server.base_url).with_timeout(Duration::from_millis(200));
    let client = ChatApiClient::new(config).expect("client should build");

    let error = client
        .send(&ChatRequest::new("hi", Vec::new()))
        .await
        .expect_err("silent backend should time out");

    assert!(error.is_timeout(), "expected timeout, got {error:?}");
}

#[tokio::test]
async fn health_probe_reports_backend_status() {
    let server = ScriptedServer::one_shot(
        "200 OK",
        r#"{"status": "healthy", "groq_configured": true}"#.to_string(),
    )
    .await;

    let client = client_for(&server.base_url);
    let health = client.health().await.expect("health probe should succeed");

    assert!(health.is_healthy());
    let observed = server.observed_request().await.expect("request captured");
    assert!(observed.starts_with("GET /health"));
}
