//! Catalog service: background loading with synchronous snapshot reads.
//!
//! One `CatalogService` is shared process-wide between the host's settings
//! layer and every processor instance. The render path calls
//! [`CatalogService::catalog`] once per frame and must never block, so the
//! service publishes immutable snapshots through `arc-swap` and performs
//! all loading on a detached background thread. Until a load completes,
//! readers see the previously published (possibly empty) catalog.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::catalog::FontCatalog;

/// Progress report emitted while a background load walks its font source.
#[derive(Debug, Clone)]
pub struct CatalogProgress {
    pub done: usize,
    pub total: usize,
    pub current_family: String,
}

/// Final outcome of a background load, delivered to the `on_done` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A new catalog snapshot was published.
    Published,
    /// The load was cancelled before completion; the old snapshot stands.
    Cancelled,
    /// The loader failed; the old snapshot stands.
    Failed(String),
}

/// Handle given to loaders for cooperative cancellation and progress
/// reporting. Loaders poll [`LoadContext::is_cancelled`] between units of
/// work; a cancelled load's result is discarded even if it completes.
pub struct LoadContext {
    cancelled: Arc<AtomicBool>,
    on_progress: Box<dyn Fn(CatalogProgress) + Send>,
}

impl LoadContext {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Forward a progress report to the host (a progress dialog, usually).
    pub fn report(&self, progress: CatalogProgress) {
        (self.on_progress)(progress);
    }
}

/// Shared catalog holder with an async-load/sync-read contract.
pub struct CatalogService {
    snapshot: ArcSwap<FontCatalog>,
    /// Guards against concurrent loads; compare-exchange acquired by the
    /// thread that wins the race.
    load_in_progress: AtomicBool,
    /// Cancellation flag for the currently running load, if any.
    active_cancel: Mutex<Option<Arc<AtomicBool>>>,
}

impl CatalogService {
    /// Create a service with an empty catalog. Readers get the fallback
    /// chain until a load publishes something real.
    pub fn new() -> Self {
        Self::with_catalog(FontCatalog::default())
    }

    /// Create a service pre-seeded with a catalog, for hosts that already
    /// have one and want to avoid the empty window entirely.
    pub fn with_catalog(catalog: FontCatalog) -> Self {
        CatalogService {
            snapshot: ArcSwap::from_pointee(catalog),
            load_in_progress: AtomicBool::new(false),
            active_cancel: Mutex::new(None),
        }
    }

    /// Synchronous snapshot read. Never blocks; may return a stale or
    /// default catalog while a load is in flight.
    pub fn catalog(&self) -> Arc<FontCatalog> {
        self.snapshot.load_full()
    }

    /// Publish a catalog directly (synchronous path for hosts that load on
    /// their own schedule).
    pub fn publish(&self, catalog: FontCatalog) {
        self.snapshot.store(Arc::new(catalog));
    }

    /// Whether a background load is currently running.
    pub fn is_loading(&self) -> bool {
        self.load_in_progress.load(Ordering::SeqCst)
    }

    /// Cancel the in-flight load, if any. The loader observes the flag at
    /// its own pace; the old snapshot remains in place regardless.
    pub fn cancel(&self) {
        if let Some(flag) = self.active_cancel.lock().as_ref() {
            log::info!("cancelling in-flight catalog load");
            flag.store(true, Ordering::Relaxed);
        }
    }

    /// Start a background load. At most one load runs at a time; returns
    /// `false` without spawning anything when another is already in flight.
    ///
    /// On success the new catalog replaces the published snapshot; on
    /// failure or cancellation the old snapshot stands. `on_progress` and
    /// `on_done` both run on the background thread.
    pub fn begin_load<L, P, F>(self: &Arc<Self>, loader: L, on_progress: P, on_done: F) -> bool
    where
        L: FnOnce(&LoadContext) -> anyhow::Result<FontCatalog> + Send + 'static,
        P: Fn(CatalogProgress) + Send + 'static,
        F: FnOnce(&LoadOutcome) + Send + 'static,
    {
        if self
            .load_in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::debug!("catalog load already in progress; ignoring request");
            return false;
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        *self.active_cancel.lock() = Some(Arc::clone(&cancelled));
        let ctx = LoadContext {
            cancelled,
            on_progress: Box::new(on_progress),
        };

        let service = Arc::clone(self);
        thread::spawn(move || {
            let outcome = match loader(&ctx) {
                Ok(_) | Err(_) if ctx.is_cancelled() => {
                    log::info!("catalog load cancelled; keeping previous snapshot");
                    LoadOutcome::Cancelled
                }
                Ok(catalog) => {
                    log::info!("catalog load finished with {} families", catalog.len());
                    service.snapshot.store(Arc::new(catalog));
                    LoadOutcome::Published
                }
                Err(e) => {
                    log::warn!("catalog load failed: {e:#}");
                    LoadOutcome::Failed(e.to_string())
                }
            };
            *service.active_cancel.lock() = None;
            service.load_in_progress.store(false, Ordering::SeqCst);
            on_done(&outcome);
        });

        true
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}
