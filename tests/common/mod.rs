//! Shared test helpers and scripted provider.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use variantly::api::{router, AppState};
use variantly::auth::{AuthService, TokenIssuer};
use variantly::error::{ProviderError, ProviderFailure};
use variantly::generation::ContentGenerator;
use variantly::provider::{ProviderId, ProviderRequest, ProviderSet, TextProvider};
use variantly::service::GenerationService;
use variantly::store::MemoryStore;

enum Behavior {
    Script,
    Hang,
    Panic,
}

/// A provider that replays queued results and records every request.
pub struct ScriptedProvider {
    id: ProviderId,
    blame: ProviderId,
    behavior: Behavior,
    responses: Mutex<VecDeque<Result<String, ProviderFailure>>>,
    requests: Mutex<Vec<ProviderRequest>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            blame: id,
            behavior: Behavior::Script,
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Never answers.
    pub fn hanging(id: ProviderId) -> Self {
        Self {
            behavior: Behavior::Hang,
            ..Self::new(id)
        }
    }

    /// Panics on every call.
    pub fn panicking(id: ProviderId) -> Self {
        Self {
            behavior: Behavior::Panic,
            ..Self::new(id)
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, failure: ProviderFailure) -> Self {
        self.responses.lock().unwrap().push_back(Err(failure));
        self
    }

    /// Tag scripted failures with another provider's id.
    pub fn blaming(mut self, other: ProviderId) -> Self {
        self.blame = other;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match self.behavior {
            Behavior::Hang => std::future::pending().await,
            Behavior::Panic => panic!("scripted provider panic"),
            Behavior::Script => {}
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(failure)) => Err(failure.tag(self.blame)),
            None => Err(ProviderFailure::EmptyResponse.tag(self.id)),
        }
    }
}

/// A generator over the given providers.
pub fn generator(providers: &[Arc<ScriptedProvider>]) -> ContentGenerator {
    let set = providers.iter().fold(ProviderSet::empty(), |set, p| {
        set.with(p.clone() as Arc<dyn TextProvider>)
    });
    ContentGenerator::new(set)
}

/// Router with no providers configured, so every generation is mock content.
pub fn test_app() -> axum::Router {
    let store = Arc::new(MemoryStore::new());
    let generations = GenerationService::new(ContentGenerator::new(ProviderSet::empty()), store.clone());
    let auth = AuthService::new(
        store,
        TokenIssuer::new("test-secret", chrono::Duration::hours(1)),
    );
    router(AppState::new(generations, auth))
}
