#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use poke_index::provider::{DataProvider, FetchError};
use poke_index::resolve::NameDistance;
use poke_index::types::Record;
use poke_index::LookupCache;

pub fn rec(id: u32, name: &str) -> Record {
    Record::new(id, name, id)
}

pub fn starters() -> Vec<Record> {
    vec![rec(1, "Bulbasaur"), rec(4, "Charmander")]
}

/// Plays back a fixed list of fetch results, then fails every call.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<Vec<Record>, FetchError>>>,
    pub calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<Vec<Record>, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Api("script exhausted".into())))
    }
}

/// Blocks every fetch until the test releases it.
pub struct GatedProvider {
    pub records: Vec<Record>,
    pub gate: Notify,
    pub calls: AtomicUsize,
}

impl GatedProvider {
    pub fn new(records: Vec<Record>) -> Arc<Self> {
        Arc::new(Self {
            records,
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl DataProvider for GatedProvider {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.records.clone())
    }
}

/// Never answers.
pub struct HangingProvider;

#[async_trait]
impl DataProvider for HangingProvider {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        std::future::pending().await
    }
}

/// Levenshtein that counts how often it runs.
#[derive(Clone, Default)]
pub struct CountingDistance {
    pub calls: Arc<AtomicUsize>,
}

impl CountingDistance {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NameDistance for CountingDistance {
    fn distance(&self, candidate: &str, query: &str) -> usize {
        self.calls.fetch_add(1, Ordering::SeqCst);
        strsim::levenshtein(candidate, query)
    }
}

/// Poll `cond` until it holds, failing the test after two seconds.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !cond() {
        assert!(tokio::time::Instant::now() < deadline, "condition not met in time");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

pub async fn wait_ready<D>(cache: &LookupCache<D>)
where
    D: NameDistance + Send + Sync + 'static,
{
    wait_until(|| cache.is_ready()).await;
}
