use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use generate_api::{GenerateApiClient, GenerateApiConfig, GenerateApiError};

use crate::app::RequestId;

/// Canned reply used by [`MockCompletionBackend`] when its scripted replies
/// run out.
pub const DEFAULT_MOCK_REPLY: &str = "Mocked reply.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub request_id: RequestId,
    pub prompt: String,
}

/// Seam between the session runtime and the completion transport.
///
/// `complete` is called on a worker thread and blocks until the request
/// settles; there is no streaming and no cancellation.
pub trait CompletionBackend: Send + Sync + 'static {
    fn complete(&self, request: CompletionRequest) -> Result<String, String>;
}

/// Backend for the hosted generate endpoint.
pub struct GenerateApiBackend {
    client: GenerateApiClient,
}

impl GenerateApiBackend {
    pub fn new(config: GenerateApiConfig) -> Result<Self, GenerateApiError> {
        Ok(Self {
            client: GenerateApiClient::new(config)?,
        })
    }
}

impl CompletionBackend for GenerateApiBackend {
    fn complete(&self, request: CompletionRequest) -> Result<String, String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| format!("failed to initialize tokio runtime: {error}"))?;

        runtime
            .block_on(self.client.complete(&request.prompt))
            .map_err(|error| error.to_string())
    }
}

/// Deterministic backend for tests and offline runs.
///
/// Serves scripted replies in order and records every prompt it receives.
#[derive(Debug, Default)]
pub struct MockCompletionBackend {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletionBackend {
    pub fn new(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        lock_unpoisoned(&self.prompts).clone()
    }
}

impl CompletionBackend for MockCompletionBackend {
    fn complete(&self, request: CompletionRequest) -> Result<String, String> {
        lock_unpoisoned(&self.prompts).push(request.prompt);
        lock_unpoisoned(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_MOCK_REPLY.to_string()))
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_serves_scripted_replies_in_order_then_default() {
        let backend = MockCompletionBackend::new(vec![
            Ok("one".to_string()),
            Err("boom".to_string()),
        ]);

        let request = |id: RequestId, prompt: &str| CompletionRequest {
            request_id: id,
            prompt: prompt.to_string(),
        };

        assert_eq!(backend.complete(request(1, "a")), Ok("one".to_string()));
        assert_eq!(backend.complete(request(2, "b")), Err("boom".to_string()));
        assert_eq!(
            backend.complete(request(3, "c")),
            Ok(DEFAULT_MOCK_REPLY.to_string())
        );
        assert_eq!(backend.recorded_prompts(), vec!["a", "b", "c"]);
    }
}
