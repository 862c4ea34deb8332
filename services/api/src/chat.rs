use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Reply shown whenever the assistant backend cannot answer
pub const APOLOGY: &str = "Sorry, I'm having trouble responding right now. Please try again later.";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Client for the assistant's `POST /api/chat` endpoint
#[derive(Clone, Debug)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    /// Never fails: any error becomes the canned apology
    pub async fn ask(&self, message: &str) -> ChatReply {
        match self.send(message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Chat request to {} failed: {}", self.endpoint, e);
                ChatReply { reply: APOLOGY.to_string() }
            }
        }
    }

    async fn send(&self, message: &str) -> Result<ChatReply, reqwest::Error> {
        self.client
            .post(&self.endpoint)
            .json(&ChatRequest { message: message.to_string() })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Json, Router};
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn returns_upstream_reply() {
        let app = Router::new().route(
            "/api/chat",
            post(|Json(req): Json<ChatRequest>| async move {
                Json(ChatReply { reply: format!("echo: {}", req.message) })
            }),
        );
        let client = ChatClient::new(&format!("{}/", serve(app).await));

        assert_eq!(client.ask("hello").await.reply, "echo: hello");
    }

    #[tokio::test]
    async fn non_success_status_yields_apology() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = ChatClient::new(&serve(app).await);

        assert_eq!(client.ask("hello").await.reply, APOLOGY);
    }

    #[tokio::test]
    async fn malformed_body_yields_apology() {
        let app = Router::new().route("/api/chat", post(|| async { "not json" }));
        let client = ChatClient::new(&serve(app).await);

        assert_eq!(client.ask("hello").await.reply, APOLOGY);
    }

    #[tokio::test]
    async fn unreachable_backend_yields_apology() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ChatClient::new(&format!("http://{addr}"));
        assert_eq!(client.ask("hello").await.reply, APOLOGY);
    }
}
