use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::{
    FutureExt,
    future::{BoxFuture, Shared},
};

use crate::{
    error::{DemandError, internal_error},
    ports::SupplierPort,
    scope::Scope,
    types::{Payload, Supplier},
};

type SharedOutcome = Shared<BoxFuture<'static, Result<Payload, DemandError>>>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Retention {
    Memoize,
    InFlightOnly,
}

/// Single-flight state for one wrapped supplier: at most one underlying
/// execution at a time, late callers attach to its shared outcome.
#[derive(Default)]
struct CacheState {
    done: Option<Payload>,
    in_flight: Option<SharedOutcome>,
}

struct CacheBox {
    retention: Retention,
    state: Mutex<CacheState>,
}

pub struct CachedSupplier {
    inner: Supplier,
    cache: Arc<CacheBox>,
}

impl CachedSupplier {
    fn new(inner: Supplier, retention: Retention) -> Self {
        Self {
            inner,
            cache: Arc::new(CacheBox {
                retention,
                state: Mutex::new(CacheState::default()),
            }),
        }
    }
}

#[async_trait]
impl SupplierPort for CachedSupplier {
    async fn supply(&self, payload: Payload, scope: Scope) -> Result<Payload, DemandError> {
        let shared = {
            let mut state = self.cache.state.lock().expect("lock poisoned");
            if self.cache.retention == Retention::Memoize {
                if let Some(value) = state.done.as_ref() {
                    tracing::trace!(target: "demandflow", "cache_hit");
                    return Ok(value.clone());
                }
            }
            match state.in_flight.as_ref() {
                Some(existing) => {
                    tracing::trace!(target: "demandflow", "cache_attach");
                    existing.clone()
                }
                None => {
                    tracing::trace!(target: "demandflow", "cache_start");
                    let shared =
                        spawn_execution(Arc::clone(&self.inner), Arc::clone(&self.cache), payload, scope);
                    state.in_flight = Some(shared.clone());
                    shared
                }
            }
        };
        shared.await
    }
}

/// Runs the underlying supplier on its own task so that one attached
/// caller going away cannot cancel the execution other callers share.
/// The task performs the completion transition itself: a call issued
/// strictly after completion always observes the box as idle (or done,
/// for the memoizing variant).
fn spawn_execution(
    inner: Supplier,
    cache: Arc<CacheBox>,
    payload: Payload,
    scope: Scope,
) -> SharedOutcome {
    let task_cache = Arc::clone(&cache);
    let handle = tokio::spawn(async move {
        let outcome = inner.supply(payload, scope).await;
        let mut state = task_cache.state.lock().expect("lock poisoned");
        if task_cache.retention == Retention::Memoize {
            if let Ok(value) = outcome.as_ref() {
                state.done = Some(value.clone());
            }
        }
        state.in_flight = None;
        outcome
    });

    async move {
        match handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                // A panicked supplier never reached the completion
                // transition; reset the box so later calls start fresh.
                cache.state.lock().expect("lock poisoned").in_flight = None;
                Err(internal_error(format!("cached supplier task failed: {err}")))
            }
        }
    }
    .boxed()
    .shared()
}

/// First success is remembered for the life of the wrapped supplier;
/// failures are never cached, so the next call retries.
pub fn with_memoization(supplier: Supplier) -> Supplier {
    Arc::new(CachedSupplier::new(supplier, Retention::Memoize))
}

/// Concurrent callers share the ongoing execution; once it completes
/// (success or failure) the box resets and the next call starts fresh.
pub fn with_in_flight_deduplication(supplier: Supplier) -> Supplier {
    Arc::new(CachedSupplier::new(supplier, Retention::InFlightOnly))
}
