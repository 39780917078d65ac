//! Scripted in-memory provider for tests.
//!
//! Each call to [`LlmProvider::complete`] pops the next scripted response.
//! When the script runs out, the fallback response is used.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::provider::{LlmError, LlmProvider, Message};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    /// Returned as `LlmError::ApiError` with this status.
    Error(u16),
}

impl MockResponse {
    pub fn text(s: impl Into<String>) -> Self {
        MockResponse::Text(s.into())
    }

    fn to_result(&self) -> Result<String, LlmError> {
        match self {
            MockResponse::Text(s) => Ok(s.clone()),
            MockResponse::Error(status) => Err(LlmError::ApiError {
                status: *status,
                body: "mock failure".to_string(),
            }),
        }
    }
}

pub struct MockProvider {
    script: Mutex<Vec<MockResponse>>,
    fallback: MockResponse,
    prompts: Mutex<Vec<String>>,
    call_count: AtomicUsize,
}

impl MockProvider {
    /// Replies with `responses` in order, then with an empty completion.
    pub fn scripted(responses: Vec<MockResponse>) -> Self {
        Self::with_fallback(responses, MockResponse::text(""))
    }

    /// Always replies with `response`.
    pub fn always(response: MockResponse) -> Self {
        Self::with_fallback(Vec::new(), response)
    }

    pub fn with_fallback(mut responses: Vec<MockResponse>, fallback: MockResponse) -> Self {
        // Stored reversed so `pop` yields them in order.
        responses.reverse();
        Self {
            script: Mutex::new(responses),
            fallback,
            prompts: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Content of the last message of every call, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let (Ok(mut prompts), Some(last)) = (self.prompts.lock(), messages.last()) {
            prompts.push(last.content.clone());
        }
        let next = self.script.lock().ok().and_then(|mut s| s.pop());
        next.as_ref().unwrap_or(&self.fallback).to_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_script_then_fallback() {
        let mock = MockProvider::with_fallback(
            vec![MockResponse::text("a"), MockResponse::Error(429)],
            MockResponse::text("done"),
        );
        assert_eq!(mock.complete(vec![Message::user("1")]).await.unwrap(), "a");
        assert!(matches!(
            mock.complete(vec![Message::user("2")]).await,
            Err(LlmError::ApiError { status: 429, .. })
        ));
        assert_eq!(mock.complete(vec![Message::user("3")]).await.unwrap(), "done");
        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.prompts(), vec!["1", "2", "3"]);
    }
}
