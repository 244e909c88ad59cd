//! Vector store provisioning for the playbook
//!
//! One-time setup flow: upload the playbook file, create a vector store
//! over it, then poll until indexing reaches a terminal status. A store
//! that ends up failed or cancelled is deleted so reruns start clean.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use ndareview_config::Config;
use ndareview_utils::error::LlmError;

use crate::http_client::HttpClient;

/// Default OpenAI API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Interval between indexing status polls
const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Give up polling after this many attempts (10 minutes at 5s each)
const MAX_POLL_ATTEMPTS: u32 = 120;

/// Timeout for individual admin calls; uploads of large playbooks need room
const ADMIN_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Result of a successful vector store setup
#[derive(Debug, Clone)]
pub struct SetupOutcome {
    /// Identifier to configure as the playbook store
    pub vector_store_id: String,
    /// Identifier of the uploaded playbook file
    pub file_id: String,
    /// Display name of the store
    pub name: String,
}

/// Administrative client for vector store setup
pub struct VectorStoreClient {
    client: Arc<HttpClient>,
    base_url: String,
    api_key: String,
}

impl VectorStoreClient {
    /// Create an admin client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Misconfiguration` if the API key environment
    /// variable is not set or the HTTP client cannot be constructed.
    pub fn new_from_config(config: &Config) -> Result<Self, LlmError> {
        let api_key_env = config.api_key_env();
        let api_key = std::env::var(api_key_env).map_err(|_| {
            LlmError::Misconfiguration(format!(
                "OpenAI API key not found in environment variable '{api_key_env}'. \
                 Please set this variable or configure a different api_key_env in [provider]."
            ))
        })?;

        Ok(Self {
            client: Arc::new(HttpClient::new()?),
            base_url: config
                .provider
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
        })
    }

    /// Upload the playbook and build an indexed vector store over it.
    ///
    /// Polls the store every 5 seconds until indexing completes. If
    /// indexing fails or is cancelled, the partially-created store is
    /// deleted before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `LlmError` for upload, creation, polling, and indexing
    /// failures.
    pub async fn setup_playbook_store(
        &self,
        playbook_path: &Path,
        store_name: &str,
    ) -> Result<SetupOutcome, LlmError> {
        let file_id = self.upload_playbook(playbook_path).await?;
        info!(file_id = %file_id, "playbook uploaded");

        let store = self.create_store(store_name, &file_id).await?;
        info!(vector_store_id = %store.id, "vector store created, indexing");

        match self.wait_for_indexing(&store.id).await {
            Ok(()) => Ok(SetupOutcome {
                vector_store_id: store.id,
                file_id,
                name: store.name.unwrap_or_else(|| store_name.to_string()),
            }),
            Err(e) => {
                // Leave no half-indexed store behind; the id would look
                // usable in config but return empty search results.
                warn!(vector_store_id = %store.id, "indexing failed, deleting store");
                if let Err(delete_err) = self.delete_store(&store.id).await {
                    warn!(error = %delete_err, "failed to delete partial vector store");
                }
                Err(e)
            }
        }
    }

    async fn upload_playbook(&self, path: &Path) -> Result<String, LlmError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            LlmError::Misconfiguration(format!(
                "cannot read playbook file {}: {e}",
                path.display()
            ))
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("playbook.md")
            .to_string();

        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let request = reqwest::Client::new()
            .post(format!("{}/files", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form);

        // Multipart bodies are not cloneable, so no retry here
        let response = self
            .client
            .execute_once(request, ADMIN_CALL_TIMEOUT, "openai")
            .await?;

        let uploaded: UploadedFile = response
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("Failed to parse upload response: {e}")))?;

        Ok(uploaded.id)
    }

    async fn create_store(&self, name: &str, file_id: &str) -> Result<VectorStore, LlmError> {
        let body = CreateStoreRequest {
            name: name.to_string(),
            file_ids: vec![file_id.to_string()],
        };

        let request = reqwest::Client::new()
            .post(format!("{}/vector_stores", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body);

        let response = self
            .client
            .execute_with_retry(request, ADMIN_CALL_TIMEOUT, "openai")
            .await?;

        response
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("Failed to parse store response: {e}")))
    }

    async fn wait_for_indexing(&self, store_id: &str) -> Result<(), LlmError> {
        for attempt in 1..=MAX_POLL_ATTEMPTS {
            let store = self.get_store(store_id).await?;
            debug!(
                vector_store_id = %store_id,
                status = %store.status,
                attempt,
                "polled vector store"
            );

            match indexing_disposition(&store.status) {
                IndexingDisposition::Done => return Ok(()),
                IndexingDisposition::Failed => {
                    return Err(LlmError::ProviderOutage(format!(
                        "vector store indexing ended with status '{}'",
                        store.status
                    )));
                }
                IndexingDisposition::Pending => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }

        Err(LlmError::Timeout {
            duration: POLL_INTERVAL * MAX_POLL_ATTEMPTS,
        })
    }

    async fn get_store(&self, store_id: &str) -> Result<VectorStore, LlmError> {
        let request = reqwest::Client::new()
            .get(format!("{}/vector_stores/{store_id}", self.base_url))
            .bearer_auth(&self.api_key);

        let response = self
            .client
            .execute_with_retry(request, ADMIN_CALL_TIMEOUT, "openai")
            .await?;

        response
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("Failed to parse store response: {e}")))
    }

    async fn delete_store(&self, store_id: &str) -> Result<(), LlmError> {
        let request = reqwest::Client::new()
            .delete(format!("{}/vector_stores/{store_id}", self.base_url))
            .bearer_auth(&self.api_key);

        self.client
            .execute_with_retry(request, ADMIN_CALL_TIMEOUT, "openai")
            .await?;
        Ok(())
    }
}

/// What a polled indexing status means for the setup loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexingDisposition {
    Done,
    /// Terminal failure; the partial store gets deleted
    Failed,
    Pending,
}

fn indexing_disposition(status: &str) -> IndexingDisposition {
    match status {
        "completed" => IndexingDisposition::Done,
        // An expired store will never finish indexing; waiting out the
        // poll cap on it buys nothing
        "failed" | "cancelled" | "expired" => IndexingDisposition::Failed,
        // in_progress and anything the API adds later keeps polling
        _ => IndexingDisposition::Pending,
    }
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateStoreRequest {
    name: String,
    file_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VectorStore {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_status")]
    status: String,
}

fn default_status() -> String {
    "in_progress".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_response_parses_status() {
        let store: VectorStore = serde_json::from_str(
            r#"{"id": "vs_abc", "name": "NDA Playbook", "status": "completed"}"#,
        )
        .unwrap();
        assert_eq!(store.id, "vs_abc");
        assert_eq!(store.status, "completed");
    }

    #[test]
    fn test_store_response_defaults_missing_status() {
        let store: VectorStore = serde_json::from_str(r#"{"id": "vs_abc"}"#).unwrap();
        assert_eq!(store.status, "in_progress");
    }

    #[test]
    fn test_create_request_shape() {
        let body = CreateStoreRequest {
            name: "NDA Playbook".to_string(),
            file_ids: vec!["file-1".to_string()],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "NDA Playbook", "file_ids": ["file-1"]})
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert_eq!(indexing_disposition("completed"), IndexingDisposition::Done);
        assert_eq!(indexing_disposition("failed"), IndexingDisposition::Failed);
        assert_eq!(
            indexing_disposition("cancelled"),
            IndexingDisposition::Failed
        );
        assert_eq!(
            indexing_disposition("expired"),
            IndexingDisposition::Failed
        );
        assert_eq!(
            indexing_disposition("in_progress"),
            IndexingDisposition::Pending
        );
    }

    #[test]
    fn test_missing_api_key_is_misconfiguration() {
        let test_env_var = "OPENAI_API_KEY_TEST_STORE";
        unsafe {
            std::env::remove_var(test_env_var);
        }

        let mut config = Config::minimal_for_testing();
        config.provider.api_key_env = Some(test_env_var.to_string());

        let result = VectorStoreClient::new_from_config(&config);
        assert!(matches!(result, Err(LlmError::Misconfiguration(_))));
    }

    mod stub_api {
        //! Minimal local HTTP stub standing in for the provider's admin
        //! endpoints, recording every (method, path) it serves.

        use std::sync::{Arc, Mutex};
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        pub type CallLog = Arc<Mutex<Vec<(String, String)>>>;

        fn header_end(buf: &[u8]) -> Option<usize> {
            buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
        }

        /// Bind on an ephemeral port and serve canned responses; returns
        /// the base URL to point the client at.
        pub async fn spawn(calls: CallLog) -> String {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();

            tokio::spawn(async move {
                while let Ok((mut socket, _)) = listener.accept().await {
                    let calls = Arc::clone(&calls);
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut tmp = [0u8; 4096];
                        let head_len = loop {
                            let n = socket.read(&mut tmp).await.unwrap_or(0);
                            if n == 0 {
                                return;
                            }
                            buf.extend_from_slice(&tmp[..n]);
                            if let Some(pos) = header_end(&buf) {
                                break pos;
                            }
                        };

                        let head = String::from_utf8_lossy(&buf[..head_len]).to_string();
                        let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
                        let method = request_line.next().unwrap_or_default().to_string();
                        let path = request_line.next().unwrap_or_default().to_string();
                        let content_length = head
                            .lines()
                            .find_map(|line| {
                                let lower = line.to_ascii_lowercase();
                                let value = lower.strip_prefix("content-length:")?;
                                value.trim().parse::<usize>().ok()
                            })
                            .unwrap_or(0);

                        // Drain the body so the client finishes its write
                        let mut body_read = buf.len() - head_len;
                        while body_read < content_length {
                            let n = socket.read(&mut tmp).await.unwrap_or(0);
                            if n == 0 {
                                break;
                            }
                            body_read += n;
                        }

                        calls.lock().unwrap().push((method.clone(), path.clone()));

                        let body = match (method.as_str(), path.as_str()) {
                            ("POST", "/files") => r#"{"id": "file-stub"}"#,
                            ("POST", "/vector_stores") => {
                                r#"{"id": "vs_stub", "name": "Stub Store", "status": "in_progress"}"#
                            }
                            ("GET", "/vector_stores/vs_stub") => {
                                r#"{"id": "vs_stub", "name": "Stub Store", "status": "failed"}"#
                            }
                            ("DELETE", "/vector_stores/vs_stub") => {
                                r#"{"id": "vs_stub", "deleted": true}"#
                            }
                            _ => "{}",
                        };
                        let response = format!(
                            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                            body.len()
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
            });

            format!("http://{addr}")
        }
    }

    #[tokio::test]
    async fn test_failed_indexing_deletes_partial_store() {
        let calls: stub_api::CallLog = Arc::default();
        let base_url = stub_api::spawn(Arc::clone(&calls)).await;

        let temp = tempfile::TempDir::new().unwrap();
        let playbook = temp.path().join("playbook.md");
        std::fs::write(&playbook, "fallback positions and risk notes").unwrap();

        let client = VectorStoreClient {
            client: Arc::new(HttpClient::new().unwrap()),
            base_url,
            api_key: "test-key".to_string(),
        };

        let err = client
            .setup_playbook_store(&playbook, "Stub Store")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::ProviderOutage(_)));
        assert!(err.to_string().contains("failed"));

        let calls = calls.lock().unwrap();
        assert!(calls.contains(&("POST".to_string(), "/files".to_string())));
        assert!(calls.contains(&("POST".to_string(), "/vector_stores".to_string())));
        // The partial store is deleted before the error surfaces
        assert_eq!(
            calls.last().unwrap(),
            &("DELETE".to_string(), "/vector_stores/vs_stub".to_string())
        );
    }
}
