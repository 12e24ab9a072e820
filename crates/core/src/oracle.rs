//! Text-completion client abstraction.
//!
//! The interview engine only ever talks to the model through
//! [`CompletionClient`]: one prompt in, one block of text out. The production
//! implementation targets any OpenAI-compatible chat endpoint, which covers
//! both OpenAI itself and Gemini's compatibility surface.

use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The model answered with no usable text.
    #[error("model returned an empty response")]
    Empty,
    /// The request itself failed (network, auth, rate limit, 5xx).
    #[error("completion request failed: {0}")]
    Provider(String),
    /// The response arrived but did not carry a text choice.
    #[error("malformed completion response: {0}")]
    Malformed(String),
}

impl CompletionError {
    /// Empty output and provider failures are worth another attempt; a
    /// malformed response shape will not improve by resending the prompt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CompletionError::Empty | CompletionError::Provider(_))
    }
}

/// A blocking-per-call, non-streaming text completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Performs a single completion attempt. Returns non-empty text on
    /// success; retrying is the caller's business.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Bounded retry schedule for oracle calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A zero-delay schedule, useful in tests.
    pub const fn immediate(attempts: u32) -> Self {
        Self {
            attempts,
            delay: Duration::ZERO,
        }
    }
}

/// Calls the client up to `policy.attempts` times, sleeping `policy.delay`
/// between attempts. Empty responses count as transient. Non-retryable
/// errors and retry exhaustion surface to the caller, which is expected to
/// hold its own deterministic fallback.
pub async fn complete_with_retry(
    client: &dyn CompletionClient,
    prompt: &str,
    policy: RetryPolicy,
) -> Result<String, CompletionError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match client.complete(prompt).await {
            Ok(text) => return Ok(text),
            Err(err) if err.is_retryable() && attempt < policy.attempts => {
                warn!(attempt, error = %err, "completion attempt failed, retrying");
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// An implementation of [`CompletionClient`] for any OpenAI-compatible API.
pub struct OpenAiCompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration, including key and base URL.
    /// * `model` - Chat model identifier (e.g. "gpt-4o").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatibleClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(0.7)
            .n(1)
            .messages(vec![
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(|e| CompletionError::Provider(e.to_string()))?
                    .into(),
            ])
            .build()
            .map_err(|e| CompletionError::Provider(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| CompletionError::Provider(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                CompletionError::Malformed("response carried no text choice".to_string())
            })?;

        if content.trim().is_empty() {
            return Err(CompletionError::Empty);
        }
        Ok(content)
    }
}

/// A scripted [`CompletionClient`] for development and testing.
///
/// Responses are served in push order; once the script runs dry every call
/// fails. The call counter lets tests assert that a code path performed no
/// oracle calls at all.
#[derive(Default)]
pub struct ScriptedCompletionClient {
    script: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: AtomicUsize,
}

impl ScriptedCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a client that answers with the given texts, in order.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for response in responses {
            client.push_text(response);
        }
        client
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .push_back(Ok(text.into()));
    }

    pub fn push_error(&self, error: CompletionError) {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .push_back(Err(error));
    }

    /// Number of `complete` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Provider("script exhausted".to_string())))
    }
}
