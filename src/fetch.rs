//! Generic request wrapper with loading/error state.
//!
//! A [`FetchHook`] owns one request function and publishes a
//! [`FetchState`] through a `watch` channel so any number of observers can
//! follow it. Every execution takes a generation number; only the
//! most recently started execution may write its outcome to the state.
//! Older completions still return their result to their own caller.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::{Mutex, watch};

use crate::api::ApiError;

/// Observable state of one hook.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    /// Non-empty whenever the latest execution failed.
    pub error: Option<String>,
}

pub type RequestFn<T, A> = Box<dyn Fn(A) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;
pub type SuccessFn<T> = Box<dyn Fn(&T) + Send + Sync>;
pub type ErrorFn = Box<dyn Fn(&ApiError) + Send + Sync>;

pub struct FetchOptions<T> {
    /// Execute on [`FetchHook::mount`] and whenever the dependencies change.
    pub run_immediately: bool,
    pub initial_value: Option<T>,
    pub on_success: Option<SuccessFn<T>>,
    pub on_error: Option<ErrorFn>,
    pub dependencies: Vec<Value>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self { run_immediately: true, initial_value: None, on_success: None, on_error: None, dependencies: Vec::new() }
    }
}

impl<T> FetchOptions<T> {
    /// Options for a hook that only runs when asked to.
    #[must_use]
    pub fn deferred() -> Self {
        Self { run_immediately: false, ..Self::default() }
    }

    #[must_use]
    pub fn initial_value(mut self, value: T) -> Self {
        self.initial_value = Some(value);
        self
    }

    #[must_use]
    pub fn on_success(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_error(mut self, f: impl Fn(&ApiError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn dependencies(mut self, deps: Vec<Value>) -> Self {
        self.dependencies = deps;
        self
    }
}

pub struct FetchHook<T, A = ()> {
    request: RequestFn<T, A>,
    run_immediately: bool,
    on_success: Option<SuccessFn<T>>,
    on_error: Option<ErrorFn>,
    state: watch::Sender<FetchState<T>>,
    generation: AtomicU64,
    dependencies: Mutex<Vec<Value>>,
}

impl<T, A> fmt::Debug for FetchHook<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchHook")
            .field("run_immediately", &self.run_immediately)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<T, A> FetchHook<T, A>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap `request`. The hook starts in the loading state when
    /// `options.run_immediately` is set, since [`Self::mount`] is expected
    /// to follow.
    pub fn new<F, Fut>(request: F, options: FetchOptions<T>) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let FetchOptions { run_immediately, initial_value, on_success, on_error, dependencies } = options;
        let (state, _) = watch::channel(FetchState { data: initial_value, loading: run_immediately, error: None });
        Self {
            request: Box::new(move |args| request(args).boxed()),
            run_immediately,
            on_success,
            on_error,
            state,
            generation: AtomicU64::new(0),
            dependencies: Mutex::new(dependencies),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Number of executions started so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Replace the data without running the request.
    pub fn set_data(&self, data: Option<T>) {
        self.state.send_modify(|s| s.data = data);
    }

    /// Run the request with `args`.
    ///
    /// # Errors
    ///
    /// Returns the request's [`ApiError`] after recording its
    /// [`ApiError::user_message`] in the state.
    pub async fn execute(&self, args: A) -> Result<T, ApiError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(generation, "fetch started");
        self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            s.loading = true;
            s.error = None;
            true
        });
        let mut guard = LoadingGuard { state: &self.state, current: &self.generation, generation, armed: true };

        let result = (self.request)(args).await;
        guard.armed = false;

        let stored = match &result {
            Ok(data) => self.store(generation, |s| s.data = Some(data.clone())),
            Err(e) => {
                let message = e.user_message();
                self.store(generation, |s| s.error = Some(message))
            }
        };
        if !stored {
            tracing::debug!(generation, "fetch superseded; result not stored");
            return result;
        }

        match &result {
            Ok(data) => {
                if let Some(f) = &self.on_success {
                    f(data);
                }
            }
            Err(e) => {
                tracing::warn!(generation, error = %e.user_message(), "fetch failed");
                if let Some(f) = &self.on_error {
                    f(e);
                }
            }
        }
        result
    }

    /// Apply `write` and clear `loading`, but only while `generation` is
    /// still the latest. The check runs under the channel's write lock.
    fn store(&self, generation: u64, write: impl FnOnce(&mut FetchState<T>)) -> bool {
        self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            write(s);
            s.loading = false;
            true
        })
    }

    /// Same as [`Self::execute`].
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub async fn refetch(&self, args: A) -> Result<T, ApiError> {
        self.execute(args).await
    }
}

/// Clears `loading` when an execution is dropped before its request
/// completes, unless a newer execution has started since.
struct LoadingGuard<'a, T> {
    state: &'a watch::Sender<FetchState<T>>,
    current: &'a AtomicU64,
    generation: u64,
    armed: bool,
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::debug!(generation = self.generation, "fetch dropped before completion");
        self.state.send_if_modified(|s| {
            if self.current.load(Ordering::SeqCst) != self.generation || !s.loading {
                return false;
            }
            s.loading = false;
            true
        });
    }
}

impl<T, A> FetchHook<T, A>
where
    T: Clone + Send + Sync + 'static,
    A: Default,
{
    /// First run. Executes with default arguments when `run_immediately`
    /// is set, else returns `None`.
    pub async fn mount(&self) -> Option<Result<T, ApiError>> {
        if !self.run_immediately {
            return None;
        }
        Some(self.execute(A::default()).await)
    }

    /// Record a new dependency list. Re-executes when `run_immediately` is
    /// set and any element differs from the previous list.
    pub async fn set_dependencies(&self, deps: Vec<Value>) -> Option<Result<T, ApiError>> {
        let changed = {
            let mut prev = self.dependencies.lock().await;
            let changed = *prev != deps;
            *prev = deps;
            changed
        };
        if !changed || !self.run_immediately {
            return None;
        }
        tracing::debug!("fetch dependencies changed");
        Some(self.execute(A::default()).await)
    }
}
