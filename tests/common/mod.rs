//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_registry;

use parking_lot::Mutex;
use pkgsearch::registry::{PackageLookup, PackageSummary, RegistryError};
use pkgsearch::search::{SearchReducer, SearchState};
use pkgsearch::store::{BoxFuture, Store, Subscription};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug, Clone)]
struct Scripted {
    delay: Duration,
    outcome: Result<Vec<String>, String>,
}

/// Package lookup with scripted answers per term.
///
/// Unscripted terms resolve immediately to an empty list. Failures surface
/// as `RegistryError::Other` carrying the scripted message, so the
/// state error equals that message verbatim.
#[derive(Default)]
pub struct StubLookup {
    scripts: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl StubLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packages(mut self, term: &str, names: &[&str]) -> Self {
        let names = names.iter().map(|n| n.to_string()).collect();
        self.script(term).outcome = Ok(names);
        self
    }

    pub fn with_failure(mut self, term: &str, message: &str) -> Self {
        self.script(term).outcome = Err(message.to_string());
        self
    }

    pub fn with_delay(mut self, term: &str, ms: u64) -> Self {
        self.script(term).delay = Duration::from_millis(ms);
        self
    }

    /// Terms looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn into_lookup(self) -> Arc<dyn PackageLookup> {
        Arc::new(self)
    }

    fn script(&mut self, term: &str) -> &mut Scripted {
        self.scripts.entry(term.to_string()).or_insert(Scripted {
            delay: Duration::ZERO,
            outcome: Ok(Vec::new()),
        })
    }
}

impl PackageLookup for StubLookup {
    fn lookup<'a>(
        &'a self,
        term: &'a str,
    ) -> BoxFuture<'a, Result<Vec<PackageSummary>, RegistryError>> {
        self.calls.lock().push(term.to_string());
        let scripted = self.scripts.get(term).cloned();

        Box::pin(async move {
            let Some(scripted) = scripted else {
                return Ok(Vec::new());
            };
            if !scripted.delay.is_zero() {
                tokio::time::sleep(scripted.delay).await;
            }
            match scripted.outcome {
                Ok(names) => Ok(names.into_iter().map(PackageSummary::named).collect()),
                Err(message) => Err(RegistryError::Other(message)),
            }
        })
    }
}

/// Every state a store notifies, in notification order.
pub struct StateRecorder {
    states: Arc<Mutex<Vec<SearchState>>>,
    _subscription: Subscription,
}

impl StateRecorder {
    pub fn attach(store: &Store<SearchReducer>) -> Self {
        let states = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&states);
        let subscription = store.subscribe(move |state: &SearchState| sink.lock().push(state.clone()));
        Self {
            states,
            _subscription: subscription,
        }
    }

    pub fn states(&self) -> Vec<SearchState> {
        self.states.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.states.lock().len()
    }
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
