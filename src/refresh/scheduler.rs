//! Background refresh driver.
//!
//! States: uninitialized -> refreshing -> ready, then ready -> refreshing ->
//! ready on every tick. One attempt at a time; see [`RefreshScheduler`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::{Expiry, RecordStore, Snapshot};
use crate::config::{CacheConfig, ConfigError};
use crate::provider::{DataProvider, FetchError};
use crate::refresh::{RefreshOutcome, RefreshStatus};
use crate::resolve::{Levenshtein, NameDistance, NameResolver};

#[derive(Debug)]
struct Tracking {
    expiry: Expiry,
    last_success: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

struct Shared<D> {
    provider: Arc<dyn DataProvider>,
    store: Arc<RecordStore>,
    resolver: Arc<NameResolver<D>>,
    config: CacheConfig,
    ready: AtomicBool,
    // Held for the whole fetch-and-install; this is the single-flight guard.
    in_flight: AsyncMutex<()>,
    fetches: AtomicU64,
    tracking: RwLock<Tracking>,
}

/// Owns every write to the record store and the name memo.
///
/// Construction fires one refresh immediately on a background task and then
/// one per `refresh_interval`. Ticks that land while an attempt is still
/// running are dropped, never queued. The timer stops when the scheduler is
/// shut down or dropped.
pub struct RefreshScheduler<D = Levenshtein> {
    shared: Arc<Shared<D>>,
    shutdown: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<D> RefreshScheduler<D>
where
    D: NameDistance + Send + Sync + 'static,
{
    /// Start the timer. Must be called from within a tokio runtime.
    ///
    /// The config is checked before anything is spawned; a zero interval or
    /// timeout would leave the cache unable to ever load.
    pub fn start(
        provider: Arc<dyn DataProvider>,
        store: Arc<RecordStore>,
        resolver: Arc<NameResolver<D>>,
        config: CacheConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let shared = Arc::new(Shared {
            provider,
            store,
            resolver,
            tracking: RwLock::new(Tracking {
                expiry: Expiry::new(config.refresh_interval),
                last_success: None,
                last_error: None,
            }),
            config,
            ready: AtomicBool::new(false),
            in_flight: AsyncMutex::new(()),
            fetches: AtomicU64::new(0),
        });

        let shutdown = CancellationToken::new();
        let task = tokio::spawn(run_timer(Arc::clone(&shared), shutdown.clone()));

        Ok(Self {
            shared,
            shutdown,
            task: Mutex::new(Some(task)),
        })
    }

    pub fn is_ready(&self) -> bool {
        self.shared.ready.load(Ordering::Acquire)
    }

    /// Refresh now, or wait for the attempt already running.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        match self.shared.in_flight.try_lock() {
            Ok(_guard) => self.shared.attempt().await,
            Err(_) => {
                debug!("refresh already in flight, waiting for it");
                drop(self.shared.in_flight.lock().await);
                RefreshOutcome::Joined
            }
        }
    }

    /// Number of fetches issued against the provider so far.
    pub fn fetch_count(&self) -> u64 {
        self.shared.fetches.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> RefreshStatus {
        let snapshot = self.shared.store.current();
        let tracking = self.shared.tracking.read();
        let ready = self.is_ready();

        RefreshStatus {
            ready,
            generation: snapshot.generation(),
            record_count: snapshot.len(),
            last_success: tracking.last_success,
            last_error: tracking.last_error.clone(),
            expires_at: ready.then(|| tracking.expiry.expires_at()),
        }
    }

    /// True while the last successful install is younger than the interval.
    pub fn is_fresh(&self) -> bool {
        self.is_ready() && self.shared.tracking.read().expiry.is_active()
    }

    /// Stop the timer. An attempt already running is left to finish.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!(error = %e, "refresh timer task ended abnormally");
            }
        }
    }
}

impl<D> Drop for RefreshScheduler<D> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run_timer<D>(shared: Arc<Shared<D>>, shutdown: CancellationToken)
where
    D: NameDistance + Send + Sync + 'static,
{
    info!(
        interval = ?shared.config.refresh_interval,
        fetch_timeout = ?shared.config.fetch_timeout,
        "starting refresh timer"
    );

    // First tick completes immediately: that is the initial refresh.
    let mut tick = interval(shared.config.refresh_interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                // Attempts run off the timer task so the cadence does not
                // depend on how long a fetch takes.
                let shared = Arc::clone(&shared);
                tokio::spawn(async move { shared.on_tick().await });
            }
            _ = shutdown.cancelled() => {
                info!("shutdown requested, stopping refresh timer");
                break;
            }
        }
    }
}

impl<D> Shared<D>
where
    D: NameDistance + Send + Sync + 'static,
{
    async fn on_tick(&self) {
        match self.in_flight.try_lock() {
            Ok(_guard) => {
                self.attempt().await;
            }
            Err(_) => debug!("previous refresh still running, skipping tick"),
        }
    }

    /// One fetch-and-install. Callers must hold `in_flight`.
    async fn attempt(&self) -> RefreshOutcome {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();

        let fetched = match timeout(self.config.fetch_timeout, self.provider.fetch_all()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.config.fetch_timeout)),
        };
        let built = fetched.and_then(|records| Ok(Snapshot::build(records)?));

        match built {
            Ok(snapshot) => {
                let published = self.store.install(snapshot);
                let generation = published.generation();
                self.resolver.reset(generation);
                self.ready.store(true, Ordering::Release);

                {
                    let mut tracking = self.tracking.write();
                    tracking.expiry.refresh();
                    tracking.last_success = published.installed_at();
                    tracking.last_error = None;
                }

                info!(
                    generation,
                    records = published.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "snapshot installed"
                );
                RefreshOutcome::Installed {
                    generation,
                    records: published.len(),
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    generation = self.store.current().generation(),
                    "refresh failed, keeping previous snapshot"
                );
                self.tracking.write().last_error = Some(e.to_string());
                RefreshOutcome::Failed
            }
        }
    }
}
